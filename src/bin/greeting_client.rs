//! Client for the greeting demo: connect over SSE, enumerate what the
//! server offers, read a greeting, call the add tool.

use toolbridge::config::mcp_sse_url;
use toolbridge::error::Result;
use toolbridge::mcp::transport::connect_sse;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let url = mcp_sse_url();
    let mut client = connect_sse(&url).await?;
    client.initialize().await?;

    println!("LISTING RESOURCES");
    let resources = client.list_resources().await?;
    if resources.is_empty() {
        println!("no concrete resources listed");
    }
    for resource in &resources {
        println!("resource: {} ({})", resource.uri, resource.name);
    }
    for template in client.list_resource_templates().await? {
        println!("resource template: {}", template.uri_template);
    }

    println!("\nLISTING TOOLS");
    for tool in client.list_tools().await? {
        println!(
            "tool: {} | {}",
            tool.name,
            tool.description.unwrap_or_default()
        );
    }

    println!("\nREADING RESOURCE");
    match client.read_resource("greeting://hello").await {
        Ok(text) => println!("greeting://hello -> {text}"),
        Err(e) => println!("error reading resource: {e}"),
    }

    println!("\nCALLING TOOL");
    let result = client
        .call_tool("add", serde_json::json!({"a": 5, "b": 7}))
        .await?;
    println!("add(5, 7) -> {}", result.text_content.unwrap_or_default());

    client.close().await
}
