//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 请求体大小上限（字节）
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
///
/// 对传入的应用路由统一加上请求体限制、错误日志和请求追踪
pub struct HttpServer {
    config: ServerConfig,
    app: Router,
}

impl HttpServer {
    pub fn new(config: ServerConfig, app: Router) -> Self {
        Self { config, app }
    }

    /// 构建 Router
    fn build_router(&self) -> Router {
        self.app
            .clone()
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}, routing::post};
    use tower::util::ServiceExt;

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.max_body_bytes, 64 * 1024);
    }

    #[tokio::test]
    async fn test_body_limit_rejects_large_payloads() {
        let app = Router::new().route("/echo", post(|body: axum::body::Bytes| async move { body }));
        let server = HttpServer::new(ServerConfig::default().with_max_body_bytes(16), app);

        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from(vec![b'a'; 64]))
            .unwrap();
        let response = server.build_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
