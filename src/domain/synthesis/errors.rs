//! Synthesis Context - Errors

use thiserror::Error;

/// 请求校验错误，全部映射为 HTTP 400，且不会触发任何上游调用
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("text is required")]
    MissingText,

    #[error("text is too long (max {max} characters, got {actual})")]
    TextTooLong { max: usize, actual: usize },
}
