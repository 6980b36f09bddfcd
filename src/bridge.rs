//! Bridge between chat-completion function calls and MCP tool invocations.
//!
//! Three operations: [`describe`] turns an advertised tool into the schema a
//! chat-completion API expects, [`ToolBridge::resolve_calls`] asks the model
//! which tools to call for a prompt, and [`dispatch`] issues the resolved
//! calls against a session.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{BridgeError, Result};
use crate::llm::types::{ChatRequestMessage, ChatResponseMessage};
use crate::llm::ChatClient;
use crate::mcp::client::{McpClient, ToolCallOutput};
use crate::mcp::schema::ToolDescriptor;

/// Fixed system instruction sent with every completion request.
const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// A tool call the model asked for, not yet issued.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInvocation {
    pub name: String,
    pub args: serde_json::Value,
}

/// Result of one dispatched invocation.
#[derive(Debug)]
pub struct InvocationOutcome {
    pub name: String,
    pub output: ToolCallOutput,
}

/// Convert an advertised tool into the schema a chat-completion API expects.
///
/// The descriptor's `properties` are copied verbatim, with no validation of
/// their contents; a descriptor without a `properties` member yields an
/// empty properties object.
pub fn describe(tool: &ToolDescriptor) -> serde_json::Value {
    let properties = tool
        .input_schema
        .get("properties")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    serde_json::json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
            }
        }
    })
}

/// The session operations dispatch needs. Implemented by [`McpClient`].
#[async_trait]
pub trait ToolSession: Send {
    async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolCallOutput>;
}

#[async_trait]
impl ToolSession for McpClient {
    async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolCallOutput> {
        McpClient::call_tool(self, name, arguments).await
    }
}

/// Issue the resolved calls against the session, in order, one at a time.
///
/// No rollback: the first failure aborts the remaining sequence and
/// propagates to the caller.
pub async fn dispatch<S: ToolSession + ?Sized>(
    invocations: Vec<PendingInvocation>,
    session: &mut S,
) -> Result<Vec<InvocationOutcome>> {
    let mut outcomes = Vec::with_capacity(invocations.len());
    for invocation in invocations {
        info!(tool = %invocation.name, "dispatching tool call");
        let output = session.call_tool(&invocation.name, invocation.args).await?;
        outcomes.push(InvocationOutcome {
            name: invocation.name,
            output,
        });
    }
    Ok(outcomes)
}

/// Bridges advertised MCP tools to a chat-completion model.
pub struct ToolBridge {
    llm: ChatClient,
}

impl ToolBridge {
    pub fn new(llm: ChatClient) -> Self {
        Self { llm }
    }

    /// Ask the model which tools to call for a natural-language prompt.
    ///
    /// Returns one entry per function call in the response, in API order,
    /// with no deduplication and no limit on count. No calls is the normal
    /// no-action case and yields an empty sequence.
    pub async fn resolve_calls(
        &self,
        prompt: &str,
        schemas: &[serde_json::Value],
    ) -> Result<Vec<PendingInvocation>> {
        let messages = [
            ChatRequestMessage::system(SYSTEM_INSTRUCTION),
            ChatRequestMessage::user(prompt),
        ];

        debug!(model = %self.llm.model(), tools = schemas.len(), "resolving tool calls");
        let message = self.llm.complete(&messages, schemas).await?;
        collect_invocations(&message)
    }
}

/// Pull the function calls out of an assistant message, decoding each
/// argument payload from its JSON string form.
fn collect_invocations(message: &ChatResponseMessage) -> Result<Vec<PendingInvocation>> {
    let Some(tool_calls) = message.tool_calls.as_ref() else {
        return Ok(Vec::new());
    };

    let mut invocations = Vec::with_capacity(tool_calls.len());
    for call in tool_calls {
        let args: serde_json::Value = serde_json::from_str(&call.function.arguments).map_err(
            |e| {
                BridgeError::MalformedResponse(format!(
                    "function call {} carries undecodable arguments: {e}",
                    call.function.name
                ))
            },
        )?;
        invocations.push(PendingInvocation {
            name: call.function.name.clone(),
            args,
        });
    }
    Ok(invocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::VecDeque;

    use crate::llm::types::{FunctionCallWire, ToolCallWire};
    use crate::mcp::schema::SchemaBuilder;

    fn descriptor(name: &str, input_schema: serde_json::Value) -> ToolDescriptor {
        ToolDescriptor {
            name: name.into(),
            description: Some(format!("{name} tool")),
            input_schema,
        }
    }

    fn call(name: &str, arguments: &str) -> ToolCallWire {
        ToolCallWire {
            id: Some(format!("call_{name}")),
            function: FunctionCallWire {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    fn message_with_calls(tool_calls: Option<Vec<ToolCallWire>>) -> ChatResponseMessage {
        ChatResponseMessage {
            content: None,
            tool_calls,
        }
    }

    struct MockSession {
        results: VecDeque<Result<ToolCallOutput>>,
        calls: Vec<(String, serde_json::Value)>,
    }

    impl MockSession {
        fn new(results: Vec<Result<ToolCallOutput>>) -> Self {
            Self {
                results: results.into(),
                calls: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl ToolSession for MockSession {
        async fn call_tool(
            &mut self,
            name: &str,
            arguments: serde_json::Value,
        ) -> Result<ToolCallOutput> {
            self.calls.push((name.to_string(), arguments));
            self.results
                .pop_front()
                .unwrap_or_else(|| Err(BridgeError::InvalidState("missing mock result".into())))
        }
    }

    fn text_output(text: &str) -> ToolCallOutput {
        ToolCallOutput {
            structured_content: None,
            text_content: Some(text.into()),
            content: Vec::new(),
        }
    }

    #[test]
    fn describe_preserves_input_schema_properties() {
        let input_schema = SchemaBuilder::new()
            .property("a", json!({"type": "number", "description": "First operand"}), true)
            .property("b", json!({"type": "number"}), true)
            .build();
        let schema = describe(&descriptor("add", input_schema.clone()));

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "add");
        assert_eq!(schema["function"]["parameters"]["type"], "object");
        assert_eq!(
            schema["function"]["parameters"]["properties"],
            input_schema["properties"]
        );
    }

    #[test]
    fn describe_handles_schema_without_properties() {
        let schema = describe(&descriptor("help", json!({"type": "object"})));
        assert_eq!(schema["function"]["parameters"]["properties"], json!({}));
    }

    #[test]
    fn collect_invocations_is_empty_without_tool_calls() {
        let no_field = message_with_calls(None);
        assert!(collect_invocations(&no_field).unwrap().is_empty());

        let empty_list = message_with_calls(Some(Vec::new()));
        assert!(collect_invocations(&empty_list).unwrap().is_empty());
    }

    #[test]
    fn collect_invocations_preserves_order_and_decodes_arguments() {
        let message = message_with_calls(Some(vec![
            call("add", r#"{"a":5,"b":7}"#),
            call("subtract", r#"{"a":9,"b":4}"#),
            call("add", r#"{"a":1,"b":2}"#),
        ]));

        let invocations = collect_invocations(&message).unwrap();
        assert_eq!(
            invocations,
            vec![
                PendingInvocation {
                    name: "add".into(),
                    args: json!({"a": 5, "b": 7}),
                },
                PendingInvocation {
                    name: "subtract".into(),
                    args: json!({"a": 9, "b": 4}),
                },
                PendingInvocation {
                    name: "add".into(),
                    args: json!({"a": 1, "b": 2}),
                },
            ]
        );
    }

    #[test]
    fn collect_invocations_rejects_undecodable_arguments() {
        let message = message_with_calls(Some(vec![call("add", r#"{"a":5,"#)]));

        let err = collect_invocations(&message).expect_err("malformed arguments should fail");
        assert!(matches!(
            err,
            BridgeError::MalformedResponse(message) if message.contains("add")
        ));
    }

    #[tokio::test]
    async fn dispatch_issues_calls_in_sequence() {
        let mut session = MockSession::new(vec![Ok(text_output("12")), Ok(text_output("42"))]);
        let invocations = vec![
            PendingInvocation {
                name: "add".into(),
                args: json!({"a": 5, "b": 7}),
            },
            PendingInvocation {
                name: "multiply".into(),
                args: json!({"a": 6, "b": 7}),
            },
        ];

        let outcomes = dispatch(invocations, &mut session)
            .await
            .expect("dispatch should collect all results");

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "add");
        assert_eq!(outcomes[0].output.text_content.as_deref(), Some("12"));
        assert_eq!(outcomes[1].name, "multiply");
        assert_eq!(
            session.calls,
            vec![
                ("add".to_string(), json!({"a": 5, "b": 7})),
                ("multiply".to_string(), json!({"a": 6, "b": 7})),
            ]
        );
    }

    #[tokio::test]
    async fn dispatch_aborts_on_first_failure() {
        let mut session = MockSession::new(vec![
            Err(BridgeError::ToolInvocation {
                tool_name: "divide".into(),
                message: "Cannot divide by zero".into(),
            }),
            Ok(text_output("12")),
        ]);
        let invocations = vec![
            PendingInvocation {
                name: "divide".into(),
                args: json!({"a": 1, "b": 0}),
            },
            PendingInvocation {
                name: "add".into(),
                args: json!({"a": 5, "b": 7}),
            },
        ];

        let err = dispatch(invocations, &mut session)
            .await
            .expect_err("first failure should abort the sequence");

        assert!(matches!(
            err,
            BridgeError::ToolInvocation { tool_name, .. } if tool_name == "divide"
        ));
        assert_eq!(session.calls.len(), 1, "remaining calls are not issued");
    }
}
