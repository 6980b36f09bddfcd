use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolbridge::bridge::{describe, ToolBridge};
use toolbridge::config::{LlmConfig, SamplingSettings};
use toolbridge::error::BridgeError;
use toolbridge::llm::ChatClient;
use toolbridge::mcp::schema::ToolDescriptor;

fn test_config(endpoint: String) -> LlmConfig {
    LlmConfig {
        endpoint,
        model: "gpt-4o".into(),
        credential_env: "UNUSED_TOKEN_ENV".into(),
        sampling: SamplingSettings::default(),
    }
}

fn bridge_for(server: &MockServer) -> ToolBridge {
    ToolBridge::new(ChatClient::with_token(test_config(server.uri()), "test-token"))
}

fn add_tool_schema() -> serde_json::Value {
    describe(&ToolDescriptor {
        name: "add".into(),
        description: Some("Add two numbers".into()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "b": { "type": "number" }
            }
        }),
    })
}

fn completion_with_tool_calls(tool_calls: serde_json::Value) -> serde_json::Value {
    json!({
        "choices": [{
            "message": {
                "content": null,
                "tool_calls": tool_calls
            }
        }]
    })
}

#[tokio::test]
async fn resolve_calls_returns_empty_without_function_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "Nothing to do here." } }]
        })))
        .mount(&server)
        .await;

    let invocations = timeout(
        Duration::from_secs(2),
        bridge_for(&server).resolve_calls("How are you?", &[add_tool_schema()]),
    )
    .await
    .expect("resolve_calls should complete before timeout")
    .expect("resolve_calls should succeed");

    assert!(invocations.is_empty());
}

#[tokio::test]
async fn resolve_calls_preserves_order_and_argument_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_with_tool_calls(json!([
                {
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "add", "arguments": "{\"a\":5,\"b\":7}" }
                },
                {
                    "id": "call_2",
                    "type": "function",
                    "function": { "name": "subtract", "arguments": "{\"a\":9,\"b\":4}" }
                }
            ]))),
        )
        .mount(&server)
        .await;

    let invocations = timeout(
        Duration::from_secs(2),
        bridge_for(&server).resolve_calls("Addition of 20 & 10", &[add_tool_schema()]),
    )
    .await
    .expect("resolve_calls should complete before timeout")
    .expect("resolve_calls should succeed");

    assert_eq!(invocations.len(), 2);
    assert_eq!(invocations[0].name, "add");
    assert_eq!(invocations[0].args, json!({"a": 5, "b": 7}));
    assert_eq!(invocations[1].name, "subtract");
    assert_eq!(invocations[1].args, json!({"a": 9, "b": 4}));
}

#[tokio::test]
async fn resolve_calls_sends_fixed_instruction_sampling_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("You are a helpful assistant."))
        .and(body_string_contains("\"max_tokens\":1000"))
        .and(body_string_contains("\"tools\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invocations = bridge_for(&server)
        .resolve_calls("Add 2 to 20", &[add_tool_schema()])
        .await
        .expect("resolve_calls should succeed");
    assert!(invocations.is_empty());
}

#[tokio::test]
async fn resolve_calls_rejects_undecodable_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_with_tool_calls(json!([
                {
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "add", "arguments": "{\"a\":5," }
                }
            ]))),
        )
        .mount(&server)
        .await;

    let err = bridge_for(&server)
        .resolve_calls("Add 2 to 20", &[add_tool_schema()])
        .await
        .expect_err("undecodable arguments should fail");

    assert!(matches!(
        err,
        BridgeError::MalformedResponse(message) if message.contains("add")
    ));
}

#[tokio::test]
async fn resolve_calls_maps_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad or expired token"))
        .mount(&server)
        .await;

    let err = bridge_for(&server)
        .resolve_calls("Add 2 to 20", &[add_tool_schema()])
        .await
        .expect_err("auth failure should propagate");

    assert!(matches!(
        err,
        BridgeError::Authentication(message) if message.contains("expired")
    ));
}

#[tokio::test]
async fn resolve_calls_rejects_response_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = bridge_for(&server)
        .resolve_calls("Add 2 to 20", &[add_tool_schema()])
        .await
        .expect_err("empty choices should fail");

    assert!(matches!(err, BridgeError::MalformedResponse(_)));
}
