//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`VOXRELAY_` 前缀）
//! 2. 配置文件（config.toml）
//! 3. 旧部署遗留的密钥变量（`HF_TOKEN`、`STRIPE_SECRET_KEY`），仅填补未设置的密钥
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use reqwest::Url;
use secrecy::SecretString;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 上游凭证的遗留环境变量
const LEGACY_UPSTREAM_TOKEN_VAR: &str = "HF_TOKEN";

/// 计费密钥的遗留环境变量
const LEGACY_CHECKOUT_SECRET_VAR: &str = "STRIPE_SECRET_KEY";

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOXRELAY_SERVER__PORT=8080`
/// - `VOXRELAY_UPSTREAM__BASE_URL=https://voice.example`
/// - `VOXRELAY_UPSTREAM__QUERY_PARAMS=json`
/// - `VOXRELAY_UPSTREAM__RETRYABLE_STATUSES=502,503,504`
/// - `VOXRELAY_SYNTHESIS__MAX_TEXT_LENGTH=300`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 2. 添加环境变量（最高优先级）
    // 前缀: VOXRELAY_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("VOXRELAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("upstream.retryable_statuses"),
    );

    // 3. 构建配置（缺省字段由 serde default 补齐）
    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 4. 遗留密钥变量
    apply_legacy_secrets(&mut app_config, |name| std::env::var(name).ok());

    // 5. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 用遗留环境变量填补未设置的密钥
fn apply_legacy_secrets<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let secret = |name: &str| {
        lookup(name)
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    };

    if config.upstream.token.is_none() {
        config.upstream.token = secret(LEGACY_UPSTREAM_TOKEN_VAR);
    }
    if config.checkout.secret_key.is_none() {
        config.checkout.secret_key = secret(LEGACY_CHECKOUT_SECRET_VAR);
    }
}

/// 验证 TTS 代理配置
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    validate_http_url("Upstream base URL", &config.upstream.base_url)?;

    if config.synthesis.max_text_length == 0 {
        return Err(ConfigError::ValidationError(
            "Max text length cannot be 0".to_string(),
        ));
    }

    if config.upstream.query_timeout_ms == 0 || config.upstream.synthesis_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Upstream timeouts cannot be 0".to_string(),
        ));
    }

    if let Some(status) = config
        .upstream
        .retryable_statuses
        .iter()
        .find(|status| !(100..=599).contains(*status))
    {
        return Err(ConfigError::ValidationError(format!(
            "Invalid retryable status: {}",
            status
        )));
    }

    Ok(())
}

/// 验证结账服务配置
pub fn validate_checkout_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.checkout.secret_key.is_none() {
        return Err(ConfigError::ValidationError(format!(
            "Checkout secret key is missing (set VOXRELAY_CHECKOUT__SECRET_KEY or {})",
            LEGACY_CHECKOUT_SECRET_VAR
        )));
    }

    validate_http_url("Checkout API base", &config.checkout.api_base)
}

fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
    }

    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is invalid: {}", name, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "{} must use http or https",
            name
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，密钥只显示是否设置）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Upstream URL: {}", config.upstream.base_url);
    tracing::info!(
        "Upstream Token: {}",
        if config.upstream.token.is_some() { "set" } else { "not set" }
    );
    tracing::info!("audio_query Params: {}", config.upstream.query_params);
    tracing::info!(
        "Retries: {} (backoff {}ms, statuses {:?})",
        config.upstream.retries,
        config.upstream.backoff_base_ms,
        config.upstream.retryable_statuses
    );
    tracing::info!(
        "Timeouts: audio_query {}ms, synthesis {}ms",
        config.upstream.query_timeout_ms,
        config.upstream.synthesis_timeout_ms
    );
    tracing::info!("Default Speaker: {}", config.synthesis.default_speaker);
    tracing::info!("Max Text Length: {}", config.synthesis.max_text_length);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
