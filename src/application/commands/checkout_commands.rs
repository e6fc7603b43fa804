//! Checkout Commands - 结账会话命令

use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResponse {
    pub url: String,
}
