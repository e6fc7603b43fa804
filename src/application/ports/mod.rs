//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod checkout_gateway;
mod voice_engine;

pub use checkout_gateway::{CheckoutError, CheckoutGatewayPort, CheckoutSession};
pub use voice_engine::{UpstreamStep, VoiceEngineError, VoiceEnginePort};
