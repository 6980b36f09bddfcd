//! LLM-driven client: advertise the server's tools to a chat-completion
//! model, then dispatch whatever calls the model asks for.

use toolbridge::bridge::{describe, dispatch, ToolBridge};
use toolbridge::config::{mcp_sse_url, LlmConfig};
use toolbridge::error::Result;
use toolbridge::llm::ChatClient;
use toolbridge::mcp::transport::connect_sse;

const PROMPT: &str = "Addition of 20 & 10";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut client = connect_sse(&mcp_sse_url()).await?;
    client.initialize().await?;

    println!("LISTING RESOURCES");
    let resources = client.list_resources().await?;
    println!("{} concrete resources listed", resources.len());

    // Templated resources are readable by URI even when the concrete
    // listing is empty; probe a few greetings directly.
    for uri in ["greeting://Alice", "greeting://Bob", "greeting://TestUser"] {
        match client.read_resource(uri).await {
            Ok(text) => {
                println!("read {uri}: {text}");
                break;
            }
            Err(e) => println!("could not read {uri}: {e}"),
        }
    }

    println!("\nLISTING TOOLS");
    let tools = client.list_tools().await?;
    let schemas: Vec<_> = tools.iter().map(describe).collect();
    for tool in &tools {
        println!("tool: {}", tool.name);
    }

    let bridge = ToolBridge::new(ChatClient::from_config(LlmConfig::from_env())?);

    println!("\nCALLING LLM: {PROMPT}");
    let invocations = bridge.resolve_calls(PROMPT, &schemas).await?;
    if invocations.is_empty() {
        println!("model requested no tool calls");
    }

    for outcome in dispatch(invocations, &mut client).await? {
        println!("{} -> {}", outcome.name, outcome.output.into_value_or_text());
    }

    client.close().await
}
