//! Chat-completions wire types.

use serde::{Deserialize, Serialize};

/// Outbound message in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequestMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

/// Assistant message returned by the API.
#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallWire>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallWire {
    #[serde(default)]
    pub id: Option<String>,
    pub function: FunctionCallWire,
}

/// Function payload: the name plus the raw JSON-encoded arguments string.
#[derive(Debug, Deserialize)]
pub struct FunctionCallWire {
    pub name: String,
    pub arguments: String,
}
