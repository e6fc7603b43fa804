//! Checkout Gateway Port - 第三方计费 API 抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::{CheckoutRequest, CheckoutRequestError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    InvalidRequest(#[from] CheckoutRequestError),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    GatewayError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 已创建的结账会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait CheckoutGatewayPort: Send + Sync {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}
