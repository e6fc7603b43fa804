//! 应用层错误定义

use thiserror::Error;

use crate::application::ports::VoiceEngineError;
use crate::domain::synthesis::RequestError;

/// 合成流程的失败出口
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 请求校验失败，未发起上游调用
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// 上游失败（状态码、负载或传输）
    #[error(transparent)]
    Upstream(#[from] VoiceEngineError),
}
