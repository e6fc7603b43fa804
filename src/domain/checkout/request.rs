//! Checkout Context - Request

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutRequestError {
    #[error("Request body is empty")]
    EmptyBody,

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Missing priceId or userId in request body")]
    MissingFields,
}

/// 创建订阅结账会话所需的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub user_id: String,
}

impl CheckoutRequest {
    /// 解析请求体
    ///
    /// 只有 `Content-Type` 含 `application/json` 时才读取请求体，否则按空对象处理。
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self, CheckoutRequestError> {
        let is_json = content_type
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let value = if is_json {
            let text = String::from_utf8_lossy(body);
            if text.trim().is_empty() {
                return Err(CheckoutRequestError::EmptyBody);
            }
            serde_json::from_str::<Value>(&text)
                .map_err(|e| CheckoutRequestError::InvalidJson(e.to_string()))?
        } else {
            Value::Null
        };

        match (non_empty_str(&value, "priceId"), non_empty_str(&value, "userId")) {
            (Some(price_id), Some(user_id)) => Ok(Self {
                price_id: price_id.to_string(),
                user_id: user_id.to_string(),
            }),
            _ => Err(CheckoutRequestError::MissingFields),
        }
    }
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
