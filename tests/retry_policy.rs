//! Retry behavior against a live HTTP mock: attempt accounting and
//! classification-driven propagation.

use std::time::Duration;

use ollama_client::{ChatRequest, ClientConfig, Error, Message, OllamaClient};

fn config_for(server: &mockito::ServerGuard) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.url())
        .with_max_attempts(3)
        .with_backoff(Duration::from_millis(1), Duration::from_millis(5))
}

fn hello() -> ChatRequest {
    ChatRequest::new(vec![Message::user("hi")]).model("test-model")
}

#[tokio::test]
async fn persistent_5xx_consumes_exact_attempt_budget() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("internal error")
        .expect(3)
        .create_async()
        .await;

    let client = OllamaClient::with_config(config_for(&server)).unwrap();
    let err = client.chat(hello()).await.unwrap_err();

    // The last observed error surfaces, not a retries-exhausted wrapper.
    assert!(matches!(err, Error::Server { status: 500, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn four_xx_fails_on_the_first_attempt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(400)
        .with_body(r#"{"error":"invalid option: frobnicate"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = OllamaClient::with_config(config_for(&server)).unwrap();
    let err = client.chat(hello()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidRequest { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_classifies_as_authentication_and_does_not_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(401)
        .with_body(r#"{"error":"missing token"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = OllamaClient::with_config(config_for(&server)).unwrap();
    let err = client.chat(hello()).await.unwrap_err();

    assert!(matches!(err, Error::Authentication { status: 401, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_model_is_not_found_and_does_not_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(404)
        .with_body(r#"{"error":"model \"absent\" not found, try pulling it first"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = OllamaClient::with_config(config_for(&server)).unwrap();
    let err = client.chat(hello()).await.unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn single_attempt_config_never_retries_5xx() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(503)
        .with_body(r#"{"error":"loading model"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server).with_max_attempts(1);
    let client = OllamaClient::with_config(config).unwrap();
    let err = client
        .generate(ollama_client::GenerateRequest::new("hi").model("test-model"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Server { status: 503, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_refused_classifies_as_connection_failure() {
    // Port 1 is essentially never listening.
    let config = ClientConfig::new()
        .with_base_url("http://127.0.0.1:1")
        .with_max_attempts(2)
        .with_backoff(Duration::from_millis(1), Duration::from_millis(2));
    let client = OllamaClient::with_config(config).unwrap();

    let err = client.chat(hello()).await.unwrap_err();
    assert!(matches!(err, Error::Connection { .. }));
}
