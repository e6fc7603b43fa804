//! HTTP Routes
//!
//! TTS 代理:
//! - /tts, /api/tts   POST 合成语音；OPTIONS 预检；其他方法 405
//! - /health          GET  存活探针
//!
//! 结账服务:
//! - /create-checkout-session   POST 创建结账会话；OPTIONS 预检；其他方法 405
//! - /health                    GET  存活探针

use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::{cors_middleware, CorsHeaders};
use super::state::{AppState, CheckoutState};

/// 创建 TTS 代理路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tts", tts_route())
        .route("/api/tts", tts_route())
}

fn tts_route() -> MethodRouter<Arc<AppState>> {
    post(handlers::synthesize)
        .options(handlers::tts_preflight)
        .fallback(handlers::tts_method_not_allowed)
}

/// 创建结账服务路由
pub fn create_checkout_routes() -> Router<Arc<CheckoutState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session)
                .options(handlers::checkout_preflight)
                .fallback(handlers::checkout_method_not_allowed),
        )
}

/// 组装 TTS 代理应用（带状态和 CORS 头）
pub fn tts_app(state: AppState) -> Router {
    create_routes()
        .layer(middleware::from_fn_with_state(CorsHeaders::TTS, cors_middleware))
        .with_state(Arc::new(state))
}

/// 组装结账服务应用
pub fn checkout_app(state: CheckoutState) -> Router {
    create_checkout_routes()
        .layer(middleware::from_fn_with_state(
            CorsHeaders::CHECKOUT,
            cors_middleware,
        ))
        .with_state(Arc::new(state))
}
