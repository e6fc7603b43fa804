//! TTS Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::SynthesizeCommand;
use crate::domain::synthesis::{AudioArtifact, RawBody};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST - 合成语音，成功时直接返回 WAV 字节
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let cmd = SynthesizeCommand {
        body: RawBody::from(body),
    };

    let result = state.synthesize_handler.handle(cmd).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, AudioArtifact::CONTENT_TYPE)],
        result.audio.into_bytes(),
    )
        .into_response())
}

/// OPTIONS - CORS 预检（响应头由 cors_middleware 添加）
pub async fn tts_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// 其他方法
pub async fn tts_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("POST only".to_string())
}
