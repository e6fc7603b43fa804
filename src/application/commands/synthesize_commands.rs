//! Synthesize Commands - 语音合成命令

use crate::domain::synthesis::{AudioArtifact, RawBody};

/// 合成命令：携带原始请求体，校验在处理器内完成
#[derive(Debug, Clone)]
pub struct SynthesizeCommand {
    pub body: RawBody,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeResponse {
    pub audio: AudioArtifact,
}

/// 合成流程状态
///
/// `Validating → QueryPending → QueryReceived → SynthesisPending → Done`，
/// 任一状态都可能以错误退出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStage {
    Validating,
    QueryPending,
    QueryReceived,
    SynthesisPending,
    Done,
}

impl SynthesisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisStage::Validating => "validating",
            SynthesisStage::QueryPending => "query_pending",
            SynthesisStage::QueryReceived => "query_received",
            SynthesisStage::SynthesisPending => "synthesis_pending",
            SynthesisStage::Done => "done",
        }
    }
}

impl std::fmt::Display for SynthesisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
