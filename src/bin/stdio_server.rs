//! Info server over stdio pipes, for the subprocess demo.

use rmcp::ServiceExt;
use toolbridge::error::{BridgeError, Result};
use toolbridge::server::InfoServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let service = InfoServer::new()
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BridgeError::Connection(format!("stdio serve failed: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| BridgeError::Connection(format!("server task failed: {e}")))?;
    Ok(())
}
