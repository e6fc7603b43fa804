//! Domain Layer - 领域层
//!
//! 包含两个互不依赖的限界上下文:
//! - Synthesis Context: 语音合成请求与上游文档
//! - Checkout Context: 订阅结账请求

pub mod checkout;
pub mod synthesis;
