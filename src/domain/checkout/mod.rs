//! Checkout Context - 订阅结账会话
//!
//! 与语音合成完全独立，只负责校验创建结账会话的请求。

mod request;

pub use request::{CheckoutRequest, CheckoutRequestError};
