//! Toolbridge — MCP demos in Rust.
//!
//! Small demo servers built on the `rmcp` SDK, clients for them, and a
//! bridge that turns a chat-completion model's function-call output into
//! actual MCP tool invocations.
//!
//! # Quick Start
//!
//! ```no_run
//! use toolbridge::prelude::*;
//! use toolbridge::bridge;
//!
//! # async fn example() -> toolbridge::error::Result<()> {
//! let mut client = connect_sse("http://127.0.0.1:3001/sse").await?;
//! client.initialize().await?;
//!
//! let schemas: Vec<_> = client.list_tools().await?.iter().map(describe).collect();
//! let llm = ChatClient::from_config(LlmConfig::from_env())?;
//! let calls = ToolBridge::new(llm).resolve_calls("Add 2 to 20", &schemas).await?;
//! for outcome in bridge::dispatch(calls, &mut client).await? {
//!     println!("{}", outcome.output.into_value_or_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod prelude;
pub mod server;
