//! Model Context Protocol (MCP) client side: descriptors, session wrapper,
//! and transport setup.

pub mod client;
pub mod schema;
pub mod transport;

pub use client::McpClient;
