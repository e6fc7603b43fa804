//! Checkout Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::application::CreateCheckoutSessionCommand;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::CheckoutState;

#[derive(Debug, Serialize)]
pub struct CheckoutSessionDto {
    pub url: String,
}

/// POST - 创建订阅结账会话
pub async fn create_checkout_session(
    State(state): State<Arc<CheckoutState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutSessionDto>, ApiError> {
    let cmd = CreateCheckoutSessionCommand {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };

    let result = state.create_checkout_session_handler.handle(cmd).await?;

    Ok(Json(CheckoutSessionDto { url: result.url }))
}

/// OPTIONS - CORS 预检
pub async fn checkout_preflight() -> &'static str {
    "ok"
}

/// 其他方法
pub async fn checkout_method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
