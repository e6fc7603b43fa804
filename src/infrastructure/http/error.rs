//! HTTP Error Handling
//!
//! 应用层错误 → HTTP 状态码 + JSON 错误体。响应前记录完整诊断信息。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{CheckoutError, SynthesisError, VoiceEngineError};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 上游失败的错误响应，附带上游诊断信息
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamErrorResponse {
    pub error: String,
    pub upstream_status: u16,
    pub upstream_status_text: String,
    pub upstream_body: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    MethodNotAllowed(String),
    UpstreamStatus {
        step: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },
    BadGateway {
        step: &'static str,
        message: String,
    },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::MethodNotAllowed(msg) => {
                (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::UpstreamStatus {
                step,
                status,
                status_text,
                body,
            } => {
                tracing::error!(
                    step = step,
                    upstream_status = status,
                    upstream_status_text = %status_text,
                    upstream_body = %body,
                    "Upstream returned an error"
                );
                (
                    StatusCode::BAD_GATEWAY,
                    Json(UpstreamErrorResponse {
                        error: format!("{} failed", step),
                        upstream_status: status,
                        upstream_status_text: status_text,
                        upstream_body: body,
                    }),
                )
                    .into_response()
            }
            ApiError::BadGateway { step, message } => {
                tracing::error!(step = step, error = %message, "Upstream returned a bad payload");
                (StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(message))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(msg))).into_response()
            }
        }
    }
}

impl From<SynthesisError> for ApiError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::InvalidRequest(err) => ApiError::BadRequest(err.to_string()),
            SynthesisError::Upstream(err) => err.into(),
        }
    }
}

impl From<VoiceEngineError> for ApiError {
    fn from(e: VoiceEngineError) -> Self {
        let message = e.to_string();
        match e {
            VoiceEngineError::Status {
                step,
                status,
                status_text,
                body,
            } => ApiError::UpstreamStatus {
                step: step.as_str(),
                status,
                status_text,
                body,
            },
            VoiceEngineError::InvalidPayload { step, .. } => ApiError::BadGateway {
                step: step.as_str(),
                message,
            },
            VoiceEngineError::Transport { step, .. } => {
                tracing::error!(step = %step, "Upstream unreachable after retries");
                ApiError::Internal(message)
            }
        }
    }
}

impl From<CheckoutError> for ApiError {
    // 结账失败一律视为请求错误
    fn from(e: CheckoutError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::UpstreamStep;
    use crate::domain::synthesis::RequestError;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                SynthesisError::InvalidRequest(RequestError::MissingText).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                SynthesisError::Upstream(VoiceEngineError::Status {
                    step: UpstreamStep::Synthesis,
                    status: 503,
                    status_text: "Service Unavailable".to_string(),
                    body: String::new(),
                })
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                SynthesisError::Upstream(VoiceEngineError::InvalidPayload {
                    step: UpstreamStep::AudioQuery,
                    reason: "eof".to_string(),
                })
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                SynthesisError::Upstream(VoiceEngineError::Transport {
                    step: UpstreamStep::AudioQuery,
                    message: "timed out".to_string(),
                })
                .into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::MethodNotAllowed("POST only".to_string()),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
