//! Resilience Adapter - 上游 HTTP 调用的超时 / 重试 / 退避

mod retry;

pub use retry::*;
