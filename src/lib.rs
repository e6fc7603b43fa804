//! voxrelay - 语音合成代理
//!
//! 把文本转语音请求转发给远端合成服务（audio_query → synthesis），
//! 并把 WAV 回传给调用方；另附一个独立部署的订阅结账服务。
//!
//! 领域层 (domain/):
//! - Synthesis Context: 请求解码与校验、上游参数文档、音频
//! - Checkout Context: 结账请求
//!
//! 应用层 (application/):
//! - Ports: VoiceEnginePort, CheckoutGatewayPort
//! - Commands: 合成编排、结账会话
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 带重试的上游客户端、HTTP 语音引擎、计费客户端
//! - HTTP: 路由、错误映射、中间件、服务器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::{load_config, AppConfig};
