//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 入站请求体解码与校验（Request Normalizer）
//! - 上游 audio_query 返回文档的参数覆盖
//! - 合成结果（WAV）的承载

mod errors;
mod query_document;
mod request;
mod value_objects;

pub use errors::RequestError;
pub use query_document::QueryDocument;
pub use request::{RawBody, SynthesisRequest};
pub use value_objects::{
    AudioArtifact, RequestLimits, SpeakerId, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_PITCH,
    DEFAULT_SPEAKER, DEFAULT_SPEED,
};
