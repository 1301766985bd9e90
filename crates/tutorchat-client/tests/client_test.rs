use futures::StreamExt;
use tutorchat_client::{ChatBackend, ClientConfig, ClientError, TutorChatClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TutorChatClient {
    let config = ClientConfig::new("user-1", "Ada").with_base_url(server.uri());
    TutorChatClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_stream_decodes_events_in_order() {
    let server = MockServer::start().await;
    let body = concat!(
        ": keep-alive\n",
        "data: {\"text_chunk\": \"Hi\"}\n\n",
        "data: {\"text_chunk\": \" there\", \"is_final\": false}\n\n",
        "data: {broken\n\n",
        "data: {\"is_final\": true, \"follow_up_prompts\": [\"Tell me more\"]}\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/aitutor/chat"))
        .and(body_partial_json(serde_json::json!({
            "conversationId": "conv-1",
            "message": "Hello",
            "context": {"userId": "user-1", "tutorName": "Ada"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client.stream("conv-1", "Hello").await.unwrap();

    let first = events.next().await.unwrap().unwrap();
    assert_eq!(first.text_chunk.as_deref(), Some("Hi"));

    let second = events.next().await.unwrap().unwrap();
    assert_eq!(second.text_chunk.as_deref(), Some(" there"));
    assert!(!second.is_final);

    // The broken line was skipped; the terminal event still arrives.
    let last = events.next().await.unwrap().unwrap();
    assert!(last.is_final);
    assert_eq!(
        last.follow_up_prompts,
        Some(vec!["Tell me more".to_string()])
    );

    // Nothing after the terminal event.
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_stream_non_success_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/aitutor/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.stream("conv-1", "Hello").await {
        Err(ClientError::Transport { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "backend exploded");
        }
        Err(other) => panic!("expected Transport, got {other:?}"),
        Ok(_) => panic!("expected an error"),
    }
}

#[tokio::test]
async fn test_stream_empty_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/aitutor/chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.stream("conv-1", "Hello").await {
        Err(ClientError::StreamUnavailable) => {}
        Err(other) => panic!("expected StreamUnavailable, got {other:?}"),
        Ok(_) => panic!("expected an error"),
    }
}

#[tokio::test]
async fn test_stream_without_terminal_event_errors() {
    let server = MockServer::start().await;
    let body = "data: {\"text_chunk\": \"Hi\"}\n\n";
    Mock::given(method("POST"))
        .and(path("/aitutor/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client.stream("conv-1", "Hello").await.unwrap();

    assert!(events.next().await.unwrap().is_ok());

    let error = events.next().await.unwrap().unwrap_err();
    assert!(matches!(error, ClientError::UnexpectedEnd));

    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_fetch_history_returns_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/aitutor/memory/conv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi there"},
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = client.fetch_history("conv-1").await.unwrap();

    assert_eq!(history.len(), 2);
    assert!(!history[0].is_assistant());
    assert!(history[1].is_assistant());
    assert_eq!(history[1].content, "Hi there");
}

#[tokio::test]
async fn test_fetch_history_miss_is_absent_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/aitutor/memory/conv-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.fetch_history("conv-1").await.is_none());
}

#[tokio::test]
async fn test_clear_memory_swallows_failures() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/aitutor/memory/conv-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Best-effort: neither the 500 here nor a dead server may surface.
    client.clear_memory("conv-1").await;

    let unreachable = TutorChatClient::new(
        ClientConfig::new("user-1", "Ada").with_base_url("http://127.0.0.1:1"),
    )
    .unwrap();
    unreachable.clear_memory("conv-1").await;
}
