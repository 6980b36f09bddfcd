//! Chat-completions client for the inference endpoint.

use tracing::debug;

use crate::config::LlmConfig;
use crate::error::{BridgeError, Result};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::types::{ChatRequestMessage, ChatResponse, ChatResponseMessage};

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    config: LlmConfig,
    token: String,
}

impl ChatClient {
    /// Build a client from config, resolving the bearer token immediately.
    pub fn from_config(config: LlmConfig) -> Result<Self> {
        let token = config.resolve_token()?;
        Ok(Self { config, token })
    }

    /// Build a client with an explicit token (pre-resolved credentials).
    pub fn with_token(config: LlmConfig, token: impl Into<String>) -> Self {
        Self {
            config,
            token: token.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Issue a single completion request and return the first choice's
    /// message. `tools` are passed through as the available functions.
    pub async fn complete(
        &self,
        messages: &[ChatRequestMessage],
        tools: &[serde_json::Value],
    ) -> Result<ChatResponseMessage> {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.sampling.temperature,
            "max_tokens": self.config.sampling.max_tokens,
            "top_p": self.config.sampling.top_p,
        });
        if !tools.is_empty() {
            let obj = body.as_object_mut().unwrap();
            obj.insert("tools".into(), serde_json::json!(tools));
        }

        let url = format!("{}/chat/completions", self.config.endpoint);
        debug!(model = %self.config.model, tools = tools.len(), "chat completion request");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.token))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatResponse = resp.json().await?;
        let choice = data.choices.into_iter().next().ok_or_else(|| {
            BridgeError::MalformedResponse("no choices in completion response".into())
        })?;

        Ok(choice.message)
    }
}
