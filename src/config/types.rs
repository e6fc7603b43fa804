//! Configuration Types
//!
//! 定义所有配置结构体

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::synthesis::{
    RequestLimits, SpeakerId, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_SPEAKER,
};
use crate::infrastructure::adapters::resilience::{
    RetryPolicy, DEFAULT_RETRIES, DEFAULT_RETRYABLE_STATUSES,
};
use crate::infrastructure::adapters::voice::ParamTransport;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成上游配置
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// 合成请求配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 结账服务配置
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语音合成上游配置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// 上游服务基础 URL
    #[serde(default = "default_upstream_url")]
    pub base_url: String,

    /// Bearer 凭证（可选）
    #[serde(default)]
    pub token: Option<SecretString>,

    /// audio_query 参数位置: query | json
    #[serde(default)]
    pub query_params: ParamTransport,

    /// 重试次数
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// 退避基数（毫秒）
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// 可重试状态码
    #[serde(default = "default_retryable_statuses")]
    pub retryable_statuses: Vec<u16>,

    /// audio_query 单次超时（毫秒）
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// synthesis 单次超时（毫秒）
    #[serde(default = "default_synthesis_timeout_ms")]
    pub synthesis_timeout_ms: u64,
}

fn default_upstream_url() -> String {
    "http://localhost:50021".to_string()
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_backoff_base_ms() -> u64 {
    500
}

fn default_retryable_statuses() -> Vec<u16> {
    DEFAULT_RETRYABLE_STATUSES.to_vec()
}

fn default_query_timeout_ms() -> u64 {
    20_000
}

fn default_synthesis_timeout_ms() -> u64 {
    30_000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            token: None,
            query_params: ParamTransport::default(),
            retries: default_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            retryable_statuses: default_retryable_statuses(),
            query_timeout_ms: default_query_timeout_ms(),
            synthesis_timeout_ms: default_synthesis_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    fn policy(&self, timeout_ms: u64) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            timeout: Duration::from_millis(timeout_ms),
            retryable_statuses: self.retryable_statuses.clone(),
            backoff_base: Duration::from_millis(self.backoff_base_ms),
        }
    }

    /// audio_query 的重试策略
    pub fn query_policy(&self) -> RetryPolicy {
        self.policy(self.query_timeout_ms)
    }

    /// synthesis 的重试策略
    pub fn synthesis_policy(&self) -> RetryPolicy {
        self.policy(self.synthesis_timeout_ms)
    }
}

/// 合成请求配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 默认说话人
    #[serde(default = "default_speaker")]
    pub default_speaker: u32,

    /// 文本最大长度（字符数）
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_speaker() -> u32 {
    DEFAULT_SPEAKER
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            default_speaker: default_speaker(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl SynthesisConfig {
    pub fn limits(&self) -> RequestLimits {
        RequestLimits {
            max_text_length: self.max_text_length,
            default_speaker: SpeakerId::new(self.default_speaker),
        }
    }
}

/// 结账服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// 计费 API 密钥（结账服务必需）
    #[serde(default)]
    pub secret_key: Option<SecretString>,

    /// 计费 API 基础 URL
    #[serde(default = "default_checkout_api_base")]
    pub api_base: String,

    /// 结账模式
    #[serde(default = "default_checkout_mode")]
    pub mode: String,

    /// 支付成功后跳转
    #[serde(default)]
    pub success_url: String,

    /// 取消后跳转
    #[serde(default)]
    pub cancel_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_checkout_timeout")]
    pub timeout_secs: u64,
}

fn default_checkout_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_checkout_mode() -> String {
    "subscription".to_string()
}

fn default_checkout_timeout() -> u64 {
    30
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base: default_checkout_api_base(),
            mode: default_checkout_mode(),
            success_url: String::new(),
            cancel_url: String::new(),
            timeout_secs: default_checkout_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
