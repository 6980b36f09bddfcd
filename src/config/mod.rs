//! Configuration for the demos: inference endpoint, model, credential
//! source, and sampling parameters.

use crate::error::{BridgeError, Result};

/// Default inference endpoint (GitHub Models, OpenAI-compatible).
pub const DEFAULT_LLM_ENDPOINT: &str = "https://models.inference.ai.azure.com";

/// Default model identifier.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o";

/// Environment variable expected to hold a short-lived bearer token.
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// MCP server endpoint the SSE demos bind and connect to.
pub const DEFAULT_MCP_SSE_URL: &str = "http://127.0.0.1:3001/sse";

/// Sampling parameters sent with every completion request.
///
/// The recognized options are exactly temperature, max_tokens and top_p.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingSettings {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 1000,
            top_p: 1.0,
        }
    }
}

/// Configuration for the chat-completions client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the bearer token.
    pub credential_env: String,
    pub sampling: SamplingSettings,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            credential_env: DEFAULT_TOKEN_ENV.to_string(),
            sampling: SamplingSettings::default(),
        }
    }
}

impl LlmConfig {
    /// Load configuration from the environment (reads `.env` if present).
    ///
    /// Recognized overrides: `LLM_ENDPOINT`, `LLM_MODEL`, `LLM_TOKEN_ENV`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("LLM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.model = model;
        }
        if let Ok(token_env) = std::env::var("LLM_TOKEN_ENV") {
            config.credential_env = token_env;
        }

        config
    }

    /// Resolve the bearer token from the configured environment variable.
    pub fn resolve_token(&self) -> Result<String> {
        std::env::var(&self.credential_env).map_err(|_| {
            BridgeError::Configuration(format!(
                "missing credential: set {} to a valid token",
                self.credential_env
            ))
        })
    }
}

/// MCP server URL used by the SSE demos (override with `MCP_SSE_URL`).
pub fn mcp_sse_url() -> String {
    std::env::var("MCP_SSE_URL").unwrap_or_else(|_| DEFAULT_MCP_SSE_URL.to_string())
}
