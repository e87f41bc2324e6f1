//! Common test utilities for chat completion tests.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a successful completion whose message content is `content`.
pub fn mock_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content, "refusal": null},
            "finish_reason": "stop"
        }]
    }))
}

/// Create a completion that carries a refusal instead of content.
#[allow(dead_code)] // Not all test files use this
pub fn mock_refusal(reason: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": null, "refusal": reason},
            "finish_reason": "stop"
        }]
    }))
}

/// Create an API error response with the given status.
#[allow(dead_code)]
pub fn mock_api_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": {"message": message, "type": "invalid_request_error"}
    }))
}

/// Mount a response for `POST /chat/completions` (expect exactly 1 call).
pub async fn mock_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
