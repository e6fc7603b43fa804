//! Voice Adapter - 语音合成上游 HTTP 客户端

mod http_voice_engine;
mod param_transport;

pub use http_voice_engine::{HttpVoiceEngine, HttpVoiceEngineConfig};
pub use param_transport::ParamTransport;
