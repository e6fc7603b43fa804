//! End-to-end tests for the checkout service against a mock payment API

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{body_string_contains, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxrelay::infrastructure::adapters::{StripeCheckoutClient, StripeCheckoutClientConfig};
use voxrelay::infrastructure::http::{checkout_app, CheckoutState};

fn app(server: &MockServer) -> Router {
    let config = StripeCheckoutClientConfig::new(SecretString::from("sk_test_123".to_owned()))
        .with_api_base(server.uri())
        .with_redirects("https://app.test/ok", "https://app.test/cancel");
    let client = StripeCheckoutClient::new(config).unwrap();
    checkout_app(CheckoutState::new(Arc::new(client)))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/create-checkout-session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn creates_session_and_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header_eq("authorization", "Bearer sk_test_123"))
        .and(body_string_contains("client_reference_id=user_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_1",
            "url": "https://checkout.test/cs_test_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(r#"{"priceId":"price_1","userId":"user_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        body_json(response).await,
        json!({"url": "https://checkout.test/cs_test_1"})
    );
}

#[tokio::test]
async fn missing_fields_are_rejected_without_calling_api() {
    let server = MockServer::start().await;

    for body in ["", "   ", r#"{"priceId":"price_1"}"#, r#"{"priceId":"","userId":"u"}"#, "{oops"] {
        let response = app(&server).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
        assert!(body_json(response).await["error"].is_string());
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn gateway_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "No such price: 'price_x'"}
        })))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(r#"{"priceId":"price_x","userId":"user_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(message.contains("No such price"), "{message}");
}

#[tokio::test]
async fn session_without_url_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_2",
            "url": null
        })))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(r#"{"priceId":"price_1","userId":"user_1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(message.contains("no url"), "{message}");
}

#[tokio::test]
async fn preflight_and_other_methods() {
    let server = MockServer::start().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/create-checkout-session")
        .body(Body::empty())
        .unwrap();
    let response = app(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/create-checkout-session")
        .body(Body::empty())
        .unwrap();
    let response = app(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
