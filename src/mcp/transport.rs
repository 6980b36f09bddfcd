//! Transport setup: connect to MCP servers over SSE or a child process.

use rmcp::model::{ClientInfo, Implementation};
use rmcp::service::ServiceExt;
use rmcp::transport::{SseClientTransport, TokioChildProcess};
use tokio::process::Command;

use crate::error::{BridgeError, Result};

use super::client::McpClient;

fn client_info() -> ClientInfo {
    ClientInfo {
        client_info: Implementation::from_build_env(),
        ..Default::default()
    }
}

/// Connect to an SSE MCP server (e.g. `http://127.0.0.1:3001/sse`).
pub async fn connect_sse(url: &str) -> Result<McpClient> {
    let transport = SseClientTransport::start(url.to_owned())
        .await
        .map_err(|e| BridgeError::Connection(format!("SSE connect to {url} failed: {e}")))?;

    McpClient::from_running_service_result(client_info().into_dyn().serve(transport).await)
}

/// Spawn a local MCP server process and connect over its stdio pipes.
pub async fn connect_stdio(command: &str, args: &[String]) -> Result<McpClient> {
    let mut cmd = Command::new(command);
    cmd.args(args);
    let transport = TokioChildProcess::new(cmd)
        .map_err(|e| BridgeError::Connection(format!("failed to spawn {command}: {e}")))?;

    McpClient::from_running_service_result(client_info().into_dyn().serve(transport).await)
}
