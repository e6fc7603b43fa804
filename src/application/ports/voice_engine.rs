//! Voice Engine Port - 语音合成上游抽象
//!
//! 上游提供两步 API：`audio_query` 生成合成参数文档，`synthesis` 根据文档输出 WAV。
//! 具体实现（重试、超时、鉴权、参数位置）在 infrastructure/adapters 层。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::synthesis::{AudioArtifact, QueryDocument, SpeakerId};

/// 上游调用步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamStep {
    AudioQuery,
    Synthesis,
}

impl UpstreamStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamStep::AudioQuery => "audio_query",
            UpstreamStep::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for UpstreamStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上游错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceEngineError {
    /// 上游返回非 2xx（重试耗尽或不可重试）
    #[error("{step} failed with HTTP {status} {status_text}")]
    Status {
        step: UpstreamStep,
        status: u16,
        status_text: String,
        body: String,
    },

    /// 上游返回 2xx，但内容无法使用
    #[error("{step} returned an invalid payload: {reason}")]
    InvalidPayload { step: UpstreamStep, reason: String },

    /// 网络错误或超时，重试耗尽
    #[error("{step} request failed: {message}")]
    Transport { step: UpstreamStep, message: String },
}

impl VoiceEngineError {
    pub fn step(&self) -> UpstreamStep {
        match self {
            VoiceEngineError::Status { step, .. }
            | VoiceEngineError::InvalidPayload { step, .. }
            | VoiceEngineError::Transport { step, .. } => *step,
        }
    }
}

/// Voice Engine Port
#[async_trait]
pub trait VoiceEnginePort: Send + Sync {
    /// 为文本 + 说话人生成合成参数文档
    async fn audio_query(
        &self,
        text: &str,
        speaker: SpeakerId,
    ) -> Result<QueryDocument, VoiceEngineError>;

    /// 用（已覆盖参数的）文档合成音频
    async fn synthesis(
        &self,
        query: &QueryDocument,
        speaker: SpeakerId,
    ) -> Result<AudioArtifact, VoiceEngineError>;
}
