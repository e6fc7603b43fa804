//! voxrelay-checkout - 订阅结账会话服务
//!
//! 与 TTS 代理分开部署，只共享配置、日志和 HTTP 外壳

use std::sync::Arc;

use voxrelay::config::{load_config_from_path, validate_checkout_config};
use voxrelay::infrastructure::adapters::{StripeCheckoutClient, StripeCheckoutClientConfig};
use voxrelay::infrastructure::http::{checkout_app, CheckoutState, HttpServer, ServerConfig};
use voxrelay::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config =
        load_config_from_path(None).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    validate_checkout_config(&config)?;

    init_logging(&config.log);

    tracing::info!("voxrelay - checkout service");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Billing API: {}", config.checkout.api_base);

    let secret_key = config
        .checkout
        .secret_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Checkout secret key is missing"))?;

    let gateway_config = StripeCheckoutClientConfig {
        api_base: config.checkout.api_base.clone(),
        secret_key,
        mode: config.checkout.mode.clone(),
        success_url: config.checkout.success_url.clone(),
        cancel_url: config.checkout.cancel_url.clone(),
        timeout_secs: config.checkout.timeout_secs,
    };
    let gateway = Arc::new(StripeCheckoutClient::new(gateway_config)?);

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let server = HttpServer::new(server_config, checkout_app(CheckoutState::new(gateway)));

    server
        .run_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received shutdown signal");
            }
        })
        .await?;

    Ok(())
}
