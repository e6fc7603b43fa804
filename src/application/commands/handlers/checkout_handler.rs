//! Checkout Handler - 创建订阅结账会话

use std::sync::Arc;

use crate::application::commands::checkout_commands::*;
use crate::application::ports::{CheckoutError, CheckoutGatewayPort};
use crate::domain::checkout::CheckoutRequest;

pub struct CreateCheckoutSessionHandler {
    gateway: Arc<dyn CheckoutGatewayPort>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(gateway: Arc<dyn CheckoutGatewayPort>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResponse, CheckoutError> {
        let request = CheckoutRequest::parse(cmd.content_type.as_deref(), &cmd.body)?;

        let session = self.gateway.create_session(&request).await?;

        tracing::info!(
            session_id = %session.id,
            user_id = %request.user_id,
            price_id = %request.price_id,
            "Checkout session created"
        );

        Ok(CreateCheckoutSessionResponse { url: session.url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CheckoutSession;
    use crate::domain::checkout::CheckoutRequestError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        requests: Mutex<Vec<CheckoutRequest>>,
    }

    #[async_trait]
    impl CheckoutGatewayPort for StubGateway {
        async fn create_session(
            &self,
            request: &CheckoutRequest,
        ) -> Result<CheckoutSession, CheckoutError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(CheckoutSession {
                id: "cs_test_1".to_string(),
                url: "https://checkout.example/cs_test_1".to_string(),
            })
        }
    }

    fn command(body: &'static str) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            content_type: Some("application/json".to_string()),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_creates_session() {
        let gateway = Arc::new(StubGateway::default());
        let handler = CreateCheckoutSessionHandler::new(gateway.clone());

        let response = handler
            .handle(command(r#"{"priceId":"price_1","userId":"user_1"}"#))
            .await
            .unwrap();

        assert_eq!(response.url, "https://checkout.example/cs_test_1");
        assert_eq!(
            gateway.requests.lock().unwrap().as_slice(),
            &[CheckoutRequest {
                price_id: "price_1".to_string(),
                user_id: "user_1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_skips_gateway() {
        let gateway = Arc::new(StubGateway::default());
        let handler = CreateCheckoutSessionHandler::new(gateway.clone());

        let err = handler.handle(command("")).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InvalidRequest(CheckoutRequestError::EmptyBody)
        ));
        assert!(gateway.requests.lock().unwrap().is_empty());
    }
}
