//! Info demo server, used by the stdio subprocess demo.

use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

const SERVER_NAME: &str = "toolbridge-info";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PairArgs {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GreetingArgs {
    /// Name to greet
    pub name: String,
}

#[derive(Clone)]
pub struct InfoServer {
    tool_router: ToolRouter<Self>,
}

impl Default for InfoServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl InfoServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Add two numbers")]
    async fn add(&self, params: Parameters<PairArgs>) -> Result<CallToolResult, McpError> {
        let PairArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a + b).to_string(),
        )]))
    }

    #[tool(description = "Multiply two numbers")]
    async fn multiply(&self, params: Parameters<PairArgs>) -> Result<CallToolResult, McpError> {
        let PairArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a * b).to_string(),
        )]))
    }

    #[tool(description = "Get a personalized greeting")]
    async fn get_greeting(
        &self,
        params: Parameters<GreetingArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Hello, {}!",
            params.0.name
        ))]))
    }

    #[tool(description = "Get information about this server")]
    async fn get_server_info(&self) -> Result<CallToolResult, McpError> {
        let info = serde_json::json!({
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "transport": "stdio",
        });
        Ok(CallToolResult::success(vec![Content::text(
            info.to_string(),
        )]))
    }
}

#[tool_handler]
impl ServerHandler for InfoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Demo server for the stdio transport. Tools: add, multiply, \
                 get_greeting and get_server_info."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
