//! Calculator demo server.

use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BinaryArgs {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

#[derive(Clone)]
pub struct CalculatorServer {
    tool_router: ToolRouter<Self>,
}

impl Default for CalculatorServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CalculatorServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Add two numbers together and return the result.")]
    async fn add(&self, params: Parameters<BinaryArgs>) -> Result<CallToolResult, McpError> {
        let BinaryArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a + b).to_string(),
        )]))
    }

    #[tool(description = "Subtract b from a and return the result.")]
    async fn subtract(&self, params: Parameters<BinaryArgs>) -> Result<CallToolResult, McpError> {
        let BinaryArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a - b).to_string(),
        )]))
    }

    #[tool(description = "Multiply two numbers together and return the result.")]
    async fn multiply(&self, params: Parameters<BinaryArgs>) -> Result<CallToolResult, McpError> {
        let BinaryArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a * b).to_string(),
        )]))
    }

    #[tool(description = "Divide a by b and return the result. b cannot be zero.")]
    async fn divide(&self, params: Parameters<BinaryArgs>) -> Result<CallToolResult, McpError> {
        let BinaryArgs { a, b } = params.0;
        if b == 0.0 {
            return Ok(CallToolResult::error(vec![Content::text(
                "Cannot divide by zero",
            )]));
        }
        Ok(CallToolResult::success(vec![Content::text(
            (a / b).to_string(),
        )]))
    }

    #[tool(description = "Get help information about available calculator operations.")]
    async fn help(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            "Available calculator operations:\n\
             - add(a, b): add two numbers together\n\
             - subtract(a, b): subtract b from a\n\
             - multiply(a, b): multiply two numbers together\n\
             - divide(a, b): divide a by b (b cannot be zero)",
        )]))
    }
}

#[tool_handler]
impl ServerHandler for CalculatorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "A demo calculator. Call add, subtract, multiply or divide with \
                 numeric operands a and b; divide rejects a zero divisor. The help \
                 tool lists the operations."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
