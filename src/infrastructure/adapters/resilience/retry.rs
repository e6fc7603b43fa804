//! Resilient Upstream Client
//!
//! 每次物理请求都有独立的超时，覆盖发送请求到读完响应体的全过程；
//! 可重试的状态码或传输错误按 `backoff_base * 2^attempt` 退避后重试（无抖动），
//! 最多 `retries + 1` 次请求。非 2xx 的最终响应原样返回，由调用方检查状态码。

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use thiserror::Error;

/// 默认重试次数（即最多 4 次请求）
pub const DEFAULT_RETRIES: u32 = 3;

/// 默认退避基数
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// 默认单次请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// 默认可重试状态码
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 3] = [502, 503, 504];

/// 重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 失败后的重试次数
    pub retries: u32,
    /// 单次请求超时
    pub timeout: Duration,
    /// 触发重试的状态码
    pub retryable_statuses: Vec<u16>,
    /// 退避基数
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status.as_u16())
    }

    /// 第 `attempt` 次请求失败后的等待时间
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// 一次逻辑调用的最坏耗时：所有退避 + 每次请求都超时
    pub fn worst_case_latency(&self) -> Duration {
        let backoff: Duration = (0..self.retries).map(|i| self.backoff(i)).sum();
        backoff + self.timeout.saturating_mul(self.max_attempts())
    }
}

/// 传输层错误（网络失败或超时）
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

impl TransportError {
    /// 构造请求本身出错（如 URL 非法）时重试没有意义
    fn is_transient(&self) -> bool {
        match self {
            TransportError::Timeout(_) => true,
            TransportError::Request(e) => !e.is_builder(),
        }
    }
}

/// 已完整读取的上游响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 响应体按 UTF-8 解码（非法字节替换）
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 失败原因
#[derive(Debug)]
pub enum FailureCause {
    Status(UpstreamResponse),
    Transport(TransportError),
}

/// 单次请求的分类结果，只在一次重试循环内存在
#[derive(Debug)]
pub enum UpstreamOutcome {
    Success(UpstreamResponse),
    RetryableFailure { cause: FailureCause, attempt: u32 },
    TerminalFailure(FailureCause),
}

impl UpstreamOutcome {
    /// 按策略对第 `attempt` 次（从 0 开始）请求的结果分类
    pub fn classify(
        result: Result<UpstreamResponse, TransportError>,
        attempt: u32,
        policy: &RetryPolicy,
    ) -> Self {
        let attempts_left = attempt < policy.retries;

        match result {
            Ok(response) if response.is_success() => UpstreamOutcome::Success(response),
            Ok(response) if attempts_left && policy.is_retryable(response.status) => {
                UpstreamOutcome::RetryableFailure {
                    cause: FailureCause::Status(response),
                    attempt,
                }
            }
            Ok(response) => UpstreamOutcome::TerminalFailure(FailureCause::Status(response)),
            Err(error) if attempts_left && error.is_transient() => {
                UpstreamOutcome::RetryableFailure {
                    cause: FailureCause::Transport(error),
                    attempt,
                }
            }
            Err(error) => UpstreamOutcome::TerminalFailure(FailureCause::Transport(error)),
        }
    }
}

/// 带重试的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct ResilientClient {
    client: Client,
}

impl ResilientClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 执行一次逻辑调用
    ///
    /// `build` 每次请求都会被调用一次，用于重新构造请求。
    /// 返回最终响应（可能是非 2xx）；只有传输错误或超时耗尽重试时返回 `Err`。
    pub async fn execute<F>(
        &self,
        label: &str,
        policy: &RetryPolicy,
        build: F,
    ) -> Result<UpstreamResponse, TransportError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            let result = self.send_once(build(&self.client), policy.timeout).await;

            match UpstreamOutcome::classify(result, attempt, policy) {
                UpstreamOutcome::Success(response) => {
                    tracing::debug!(
                        step = label,
                        attempt = attempt + 1,
                        status = response.status.as_u16(),
                        "Upstream call succeeded"
                    );
                    return Ok(response);
                }
                UpstreamOutcome::TerminalFailure(FailureCause::Status(response)) => {
                    return Ok(response);
                }
                UpstreamOutcome::TerminalFailure(FailureCause::Transport(error)) => {
                    return Err(error);
                }
                UpstreamOutcome::RetryableFailure { cause, attempt } => {
                    let delay = policy.backoff(attempt);
                    match &cause {
                        FailureCause::Status(response) => tracing::warn!(
                            step = label,
                            attempt = attempt + 1,
                            max_attempts = policy.max_attempts(),
                            status = response.status.as_u16(),
                            backoff_ms = delay.as_millis() as u64,
                            "Upstream returned retryable status"
                        ),
                        FailureCause::Transport(error) => tracing::warn!(
                            step = label,
                            attempt = attempt + 1,
                            max_attempts = policy.max_attempts(),
                            error = %error,
                            backoff_ms = delay.as_millis() as u64,
                            "Upstream request failed"
                        ),
                    }
                    // 等待期间不持有上一次的响应体
                    drop(cause);
                    tokio::time::sleep(delay).await;
                }
            }

            attempt += 1;
        }
    }

    /// 发送一次请求并读完响应体；超时即丢弃进行中的请求
    async fn send_once(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<UpstreamResponse, TransportError> {
        let attempt = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, TransportError>(UpstreamResponse::new(status, body))
        };

        match tokio::time::timeout(timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(timeout)),
        }
    }
}
