//! HTTP Layer
//!
//! TTS 代理与结账服务的路由、处理器、错误映射和中间件

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{checkout_app, create_checkout_routes, create_routes, tts_app};
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, CheckoutState};
