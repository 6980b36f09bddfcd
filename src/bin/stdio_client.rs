//! Scripted checks against the info server, spawned as a subprocess and
//! driven over its stdio pipes.

use serde_json::json;

use toolbridge::error::{BridgeError, Result};
use toolbridge::mcp::transport::connect_stdio;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Default to the sibling stdio_server binary; a command plus arguments
    // on the command line overrides it.
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let command = if args.is_empty() {
        sibling_server_command()?
    } else {
        args.remove(0)
    };

    println!("connecting to MCP server...");
    let mut client = connect_stdio(&command, &args).await?;
    client.initialize().await?;
    println!("initialization complete");

    let tools = client.list_tools().await?;
    println!("found {} tools:", tools.len());
    for tool in &tools {
        println!(
            "  - {}: {}",
            tool.name,
            tool.description.clone().unwrap_or_default()
        );
    }

    let result = client.call_tool("add", json!({"a": 5, "b": 3})).await?;
    println!("add(5, 3) -> {}", result.text_content.unwrap_or_default());

    let result = client.call_tool("multiply", json!({"a": 7, "b": 6})).await?;
    println!("multiply(7, 6) -> {}", result.text_content.unwrap_or_default());

    let result = client
        .call_tool("get_greeting", json!({"name": "Alice"}))
        .await?;
    println!("get_greeting -> {}", result.text_content.unwrap_or_default());

    let result = client.call_tool("get_server_info", json!({})).await?;
    println!("get_server_info -> {}", result.text_content.unwrap_or_default());

    println!("all checks passed");
    client.close().await
}

fn sibling_server_command() -> Result<String> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| BridgeError::Configuration("cannot locate binary directory".into()))?;
    Ok(dir.join("stdio_server").to_string_lossy().into_owned())
}
