//! SSE server for the greeting demo: an add tool plus a templated
//! greeting resource, on the endpoint the demo clients expect.

use rmcp::transport::sse_server::SseServer;
use toolbridge::error::{BridgeError, Result};
use toolbridge::server::GreetingServer;

const BIND_ADDR: &str = "127.0.0.1:3001";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addr = BIND_ADDR
        .parse()
        .map_err(|e| BridgeError::Configuration(format!("bad bind address: {e}")))?;
    let ct = SseServer::serve(addr).await?.with_service(GreetingServer::new);

    println!("greeting server listening on http://{BIND_ADDR}/sse (ctrl-c to stop)");
    tokio::signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}
