//! HTTP Voice Engine - 调用外部语音合成服务
//!
//! 实现 VoiceEnginePort trait，每一步都经过 ResilientClient（超时 + 重试）
//!
//! 外部 API:
//! POST {base}/audio_query   text + speaker（位置由 ParamTransport 决定）-> JSON 文档
//! POST {base}/synthesis?speaker=..   body: 文档 (JSON), Accept: audio/wav -> WAV 字节

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

use super::param_transport::ParamTransport;
use crate::application::ports::{UpstreamStep, VoiceEngineError, VoiceEnginePort};
use crate::domain::synthesis::{AudioArtifact, QueryDocument, SpeakerId};
use crate::infrastructure::adapters::resilience::{
    ResilientClient, RetryPolicy, TransportError, UpstreamResponse,
};

/// HTTP 上游客户端配置
#[derive(Debug, Clone)]
pub struct HttpVoiceEngineConfig {
    /// 上游服务基础 URL
    pub base_url: String,
    /// 可选 Bearer 凭证
    pub token: Option<SecretString>,
    /// audio_query 参数位置
    pub param_transport: ParamTransport,
    /// audio_query 重试策略
    pub query_policy: RetryPolicy,
    /// synthesis 重试策略
    pub synthesis_policy: RetryPolicy,
}

impl Default for HttpVoiceEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:50021".to_string(),
            token: None,
            param_transport: ParamTransport::default(),
            query_policy: RetryPolicy::default().with_timeout(Duration::from_secs(20)),
            synthesis_policy: RetryPolicy::default().with_timeout(Duration::from_secs(30)),
        }
    }
}

impl HttpVoiceEngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_param_transport(mut self, transport: ParamTransport) -> Self {
        self.param_transport = transport;
        self
    }

    pub fn with_policies(mut self, query: RetryPolicy, synthesis: RetryPolicy) -> Self {
        self.query_policy = query;
        self.synthesis_policy = synthesis;
        self
    }
}

/// HTTP 上游客户端
pub struct HttpVoiceEngine {
    client: ResilientClient,
    config: HttpVoiceEngineConfig,
}

impl HttpVoiceEngine {
    pub fn new(config: HttpVoiceEngineConfig) -> Result<Self, reqwest::Error> {
        // 超时由每次请求的策略控制
        let client = Client::builder().build()?;

        Ok(Self {
            client: ResilientClient::new(client),
            config,
        })
    }

    fn url(&self, step: UpstreamStep) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            step.as_str()
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }
}

#[async_trait]
impl VoiceEnginePort for HttpVoiceEngine {
    async fn audio_query(
        &self,
        text: &str,
        speaker: SpeakerId,
    ) -> Result<QueryDocument, VoiceEngineError> {
        let step = UpstreamStep::AudioQuery;
        let url = self.url(step);

        tracing::debug!(
            url = %url,
            text_len = text.chars().count(),
            speaker = %speaker,
            transport = %self.config.param_transport,
            "Sending audio_query request"
        );

        let response = self
            .client
            .execute(step.as_str(), &self.config.query_policy, |client| {
                let builder = self
                    .config
                    .param_transport
                    .apply(client.post(&url), text, speaker);
                self.authorize(builder)
            })
            .await
            .map_err(|e| transport_error(step, e))?;

        let body = ensure_success(step, response)?;

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| VoiceEngineError::InvalidPayload {
                step,
                reason: e.to_string(),
            })?;

        QueryDocument::from_value(value).ok_or_else(|| VoiceEngineError::InvalidPayload {
            step,
            reason: "expected a JSON object".to_string(),
        })
    }

    async fn synthesis(
        &self,
        query: &QueryDocument,
        speaker: SpeakerId,
    ) -> Result<AudioArtifact, VoiceEngineError> {
        let step = UpstreamStep::Synthesis;
        let url = self.url(step);

        tracing::debug!(url = %url, speaker = %speaker, "Sending synthesis request");

        let response = self
            .client
            .execute(step.as_str(), &self.config.synthesis_policy, |client| {
                let builder = client
                    .post(&url)
                    .query(&[("speaker", speaker.value())])
                    .header(ACCEPT, AudioArtifact::CONTENT_TYPE)
                    .json(query);
                self.authorize(builder)
            })
            .await
            .map_err(|e| transport_error(step, e))?;

        let audio = ensure_success(step, response)?;

        tracing::debug!(audio_size = audio.len(), "Synthesis response received");

        Ok(AudioArtifact::new(audio))
    }
}

fn transport_error(step: UpstreamStep, error: TransportError) -> VoiceEngineError {
    VoiceEngineError::Transport {
        step,
        message: error.to_string(),
    }
}

fn ensure_success(
    step: UpstreamStep,
    response: UpstreamResponse,
) -> Result<Bytes, VoiceEngineError> {
    if response.is_success() {
        return Ok(response.body);
    }

    let status = response.status;
    Err(VoiceEngineError::Status {
        step,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body: response.text(),
    })
}
