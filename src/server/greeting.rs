//! Greeting demo server: one add tool and a templated greeting resource.

use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::AnnotateAble,
    model::{
        CallToolResult, Content, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, RawResourceTemplate, ReadResourceRequestParams,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

const GREETING_SCHEME: &str = "greeting://";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddArgs {
    /// First addend
    pub a: i64,
    /// Second addend
    pub b: i64,
}

#[derive(Clone)]
pub struct GreetingServer {
    tool_router: ToolRouter<Self>,
}

impl Default for GreetingServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl GreetingServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Add two numbers")]
    async fn add(&self, params: Parameters<AddArgs>) -> Result<CallToolResult, McpError> {
        let AddArgs { a, b } = params.0;
        Ok(CallToolResult::success(vec![Content::text(
            (a + b).to_string(),
        )]))
    }
}

/// Resolve a `greeting://<name>` URI to its greeting text.
fn resolve_greeting(uri: &str) -> Option<String> {
    uri.strip_prefix(GREETING_SCHEME)
        .filter(|name| !name.is_empty())
        .map(|name| format!("Hello, {name}!"))
}

#[tool_handler]
impl ServerHandler for GreetingServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Demo server with an add tool and a templated greeting resource. \
                 Read greeting://<name> for a personalized greeting."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    // Templated greetings are advertised via resources/templates/list; the
    // concrete listing stays empty. Reads by URI work either way.
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::default())
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![RawResourceTemplate {
                uri_template: "greeting://{name}".into(),
                name: "get_greeting".into(),
                title: None,
                description: Some("Get a personalized greeting".into()),
                mime_type: Some("text/plain".into()),
                icons: None,
            }
            .no_annotation()],
            ..Default::default()
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match resolve_greeting(&request.uri) {
            Some(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, request.uri)],
                ..Default::default()
            }),
            None => Err(McpError::resource_not_found(
                format!("unknown resource {}", request.uri),
                None,
            )),
        }
    }
}
