//! The blocking façade mirrors async semantics from plain threads.

use ollama_client::{BlockingClient, ChatRequest, ClientConfig, Error, GenerateRequest, Message};

fn client_for(server: &mockito::ServerGuard) -> BlockingClient {
    BlockingClient::with_config(
        ClientConfig::new()
            .with_base_url(server.url())
            .with_max_attempts(1),
    )
    .unwrap()
}

#[test]
fn blocking_chat_round_trip() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body(
            r#"{"model":"test-model","message":{"role":"assistant","content":"hello"},"done":true}"#,
        )
        .create();

    let client = client_for(&server);
    let response = client
        .chat(ChatRequest::new(vec![Message::user("hi")]).model("test-model"))
        .unwrap();

    assert_eq!(response.content(), "hello");
}

#[test]
fn blocking_stream_iterates_to_the_terminal_event() {
    let mut server = mockito::Server::new();
    let body = concat!(
        "{\"model\":\"m\",\"response\":\"a\",\"done\":false}\n",
        "{\"model\":\"m\",\"response\":\"b\",\"done\":false}\n",
        "{\"model\":\"m\",\"response\":\"\",\"done\":true}\n",
    );
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create();

    let client = client_for(&server);
    let stream = client
        .generate_stream(GenerateRequest::new("go").model("m"))
        .unwrap();

    let events: Vec<_> = stream.map(|e| e.unwrap()).collect();
    assert_eq!(events.len(), 3);
    assert!(events[2].done);
}

#[test]
fn blocking_errors_carry_the_same_taxonomy() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/chat")
        .with_status(404)
        .with_body(r#"{"error":"model \"x\" not found"}"#)
        .create();

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new(vec![Message::user("hi")]).model("x"))
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn blocking_version_probe() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/version")
        .with_status(200)
        .with_body(r#"{"version":"0.5.0"}"#)
        .create();

    let client = client_for(&server);
    assert_eq!(client.version().unwrap().version, "0.5.0");
    assert!(client.is_reachable());
}

#[test]
fn abandoning_a_blocking_stream_does_not_poison_the_client() {
    let mut server = mockito::Server::new();
    let body = concat!(
        "{\"model\":\"m\",\"response\":\"a\",\"done\":false}\n",
        "{\"model\":\"m\",\"response\":\"b\",\"done\":false}\n",
        "{\"model\":\"m\",\"response\":\"\",\"done\":true}\n",
    );
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .expect_at_least(2)
        .create();

    let client = client_for(&server);

    let mut stream = client
        .generate_stream(GenerateRequest::new("go").model("m"))
        .unwrap();
    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.response, "a");
    drop(stream);

    // The abandoned stream's connection is reclaimed; the next call works.
    let events: Vec<_> = client
        .generate_stream(GenerateRequest::new("go").model("m"))
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(events.len(), 3);
}
