//! HTTP Middleware
//!
//! - HTTP 状态码错误日志中间件
//! - CORS 响应头中间件

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 每个响应都附带的 CORS 头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

impl CorsHeaders {
    /// TTS 代理
    pub const TTS: Self = Self {
        allow_methods: "POST, OPTIONS",
        allow_headers: "Content-Type, Authorization",
    };

    /// 结账会话
    pub const CHECKOUT: Self = Self {
        allow_methods: "POST, OPTIONS",
        allow_headers: "authorization, x-client-info, apikey, content-type",
    };

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(self.allow_methods),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(self.allow_headers),
        );
    }
}

/// CORS 响应头中间件（预检请求由路由自身的 OPTIONS 处理器应答）
pub async fn cors_middleware(
    State(cors): State<CorsHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    cors.apply(response.headers_mut());
    response
}
