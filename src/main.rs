//! voxrelay - TTS 代理服务

use std::sync::Arc;

use voxrelay::config::{load_config, print_config};
use voxrelay::infrastructure::adapters::{HttpVoiceEngine, HttpVoiceEngineConfig};
use voxrelay::infrastructure::http::{tts_app, AppState, HttpServer, ServerConfig};
use voxrelay::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("voxrelay - TTS proxy");
    print_config(&config);

    // 创建上游语音引擎
    let engine_config = HttpVoiceEngineConfig {
        base_url: config.upstream.base_url.clone(),
        token: config.upstream.token.clone(),
        param_transport: config.upstream.query_params,
        query_policy: config.upstream.query_policy(),
        synthesis_policy: config.upstream.synthesis_policy(),
    };
    let voice_engine = Arc::new(HttpVoiceEngine::new(engine_config)?);

    let state = AppState::new(voice_engine, config.synthesis.limits());

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let server = HttpServer::new(server_config, tts_app(state));

    // 启动服务器（带优雅关闭）
    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}
