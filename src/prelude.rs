//! Convenience re-exports for common use.

pub use crate::bridge::{describe, dispatch, InvocationOutcome, PendingInvocation, ToolBridge};
pub use crate::config::{LlmConfig, SamplingSettings};
pub use crate::error::{BridgeError, Result};
pub use crate::llm::ChatClient;
pub use crate::mcp::client::{McpClient, ToolCallOutput};
pub use crate::mcp::schema::{ResourceDescriptor, ToolDescriptor};
pub use crate::mcp::transport::{connect_sse, connect_stdio};
