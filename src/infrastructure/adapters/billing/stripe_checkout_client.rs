//! Stripe Checkout Client - 创建订阅结账会话
//!
//! POST {api_base}/v1/checkout/sessions（form 编码，Bearer 密钥）
//! 无重试：失败直接返回给调用方。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::application::ports::{CheckoutError, CheckoutGatewayPort, CheckoutSession};
use crate::domain::checkout::CheckoutRequest;

/// Stripe 客户端配置
#[derive(Debug, Clone)]
pub struct StripeCheckoutClientConfig {
    /// API 基础 URL
    pub api_base: String,
    /// 密钥
    pub secret_key: SecretString,
    /// 结账模式
    pub mode: String,
    /// 支付成功后跳转
    pub success_url: String,
    /// 取消后跳转
    pub cancel_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl StripeCheckoutClientConfig {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            api_base: "https://api.stripe.com".to_string(),
            secret_key,
            mode: "subscription".to_string(),
            success_url: String::new(),
            cancel_url: String::new(),
            timeout_secs: 30,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_redirects(
        mut self,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.cancel_url = cancel_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct StripeCheckoutClient {
    client: Client,
    config: StripeCheckoutClientConfig,
}

impl StripeCheckoutClient {
    pub fn new(config: StripeCheckoutClientConfig) -> Result<Self, CheckoutError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn sessions_url(&self) -> String {
        format!(
            "{}/v1/checkout/sessions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn form<'a>(&'a self, request: &'a CheckoutRequest) -> Vec<(&'static str, &'a str)> {
        vec![
            ("mode", self.config.mode.as_str()),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", request.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("success_url", self.config.success_url.as_str()),
            ("cancel_url", self.config.cancel_url.as_str()),
            ("client_reference_id", request.user_id.as_str()),
        ]
    }
}

#[async_trait]
impl CheckoutGatewayPort for StripeCheckoutClient {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let response = self
            .client
            .post(self.sessions_url())
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&self.form(request))
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, text));
            return Err(CheckoutError::GatewayError(message));
        }

        let body: SessionBody = response
            .json()
            .await
            .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))?;

        let url = body.url.ok_or_else(|| {
            CheckoutError::InvalidResponse("checkout session has no url".to_string())
        })?;

        Ok(CheckoutSession { id: body.id, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(api_base: &str) -> StripeCheckoutClient {
        let config = StripeCheckoutClientConfig::new(SecretString::from("sk_test_123".to_owned()))
            .with_api_base(api_base)
            .with_redirects("https://app.example/success.html", "https://app.example");
        StripeCheckoutClient::new(config).unwrap()
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            price_id: "price_1".to_string(),
            user_id: "user_1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_session_sends_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(body_string_contains("mode=subscription"))
            .and(body_string_contains("client_reference_id=user_1"))
            .and(body_string_contains("price_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_1",
                "url": "https://checkout.stripe.com/c/pay/cs_test_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client(&server.uri()).create_session(&request()).await.unwrap();

        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_1");
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "No such price: 'price_1'"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .create_session(&request())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No such price: 'price_1'");
    }

    #[tokio::test]
    async fn test_missing_url_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cs_1", "url": null})))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .create_session(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::InvalidResponse(_)));
    }
}
