//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 端口定义（VoiceEngine、CheckoutGateway）
//! - commands: 命令及处理器（合成编排、结账会话）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{CreateCheckoutSessionHandler, SynthesizeHandler},
    CreateCheckoutSessionCommand, CreateCheckoutSessionResponse, SynthesisStage,
    SynthesizeCommand, SynthesizeResponse,
};

pub use error::SynthesisError;

pub use ports::{
    CheckoutError, CheckoutGatewayPort, CheckoutSession, UpstreamStep, VoiceEngineError,
    VoiceEnginePort,
};
