//! MCP client for connecting to MCP servers.

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, JsonObject, ReadResourceRequestParams,
        ResourceContents,
    },
    service::{ClientInitializeError, DynService, RoleClient, RunningService, ServiceError},
};

use crate::error::{BridgeError, Result};

use super::schema::{ResourceDescriptor, ResourceTemplateDescriptor, ToolDescriptor};

type DynClientService = Box<dyn DynService<RoleClient>>;
pub type McpRunningService = RunningService<RoleClient, DynClientService>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Initialized,
    Closed,
}

/// Result payload of a tool call.
#[derive(Debug, Clone)]
pub struct ToolCallOutput {
    pub structured_content: Option<serde_json::Value>,
    pub text_content: Option<String>,
    pub content: Vec<serde_json::Value>,
}

impl ToolCallOutput {
    pub fn into_value_or_text(self) -> serde_json::Value {
        if let Some(structured) = self.structured_content {
            return structured;
        }
        if let Some(text) = self.text_content {
            return serde_json::Value::String(text);
        }
        serde_json::Value::Array(self.content)
    }
}

/// Client session against a Model Context Protocol server.
///
/// The session handle is exclusively owned; requests are issued one at a
/// time and awaited to completion.
pub struct McpClient {
    session: Option<McpRunningService>,
    state: ConnectionState,
}

impl McpClient {
    /// Create a client from an already-running rmcp service.
    ///
    /// The protocol handshake is handled by rmcp `serve(...)`.
    pub fn from_running_service(session: McpRunningService) -> Self {
        Self {
            session: Some(session),
            state: ConnectionState::Connected,
        }
    }

    /// Convert an rmcp connection result into a client.
    pub fn from_running_service_result(
        result: std::result::Result<McpRunningService, ClientInitializeError>,
    ) -> Result<Self> {
        result
            .map(Self::from_running_service)
            .map_err(map_client_initialize_error)
    }

    #[cfg(test)]
    fn disconnected() -> Self {
        Self {
            session: None,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ConnectionState::Initialized
    }

    /// Mark the connection initialized. Idempotent.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.state == ConnectionState::Initialized {
            return Ok(());
        }

        let Some(session) = self.session.as_ref() else {
            return Err(BridgeError::Connection("missing MCP session".into()));
        };

        if session.is_closed() {
            self.state = ConnectionState::Closed;
            return Err(BridgeError::Connection("MCP session is closed".into()));
        }

        self.state = ConnectionState::Initialized;
        Ok(())
    }

    /// List available tools from the server.
    pub async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>> {
        self.ensure_initialized()?;
        let session = self.session_ref()?;

        let tools = match session.list_all_tools().await {
            Ok(tools) => tools,
            Err(ServiceError::UnexpectedResponse) => {
                let page = session
                    .list_tools(None)
                    .await
                    .map_err(|e| map_service_error("list_tools", e))?;
                page.tools
            }
            Err(e) => return Err(map_service_error("list_tools", e)),
        };

        Ok(tools.into_iter().map(map_tool_descriptor).collect())
    }

    /// List concrete resources from the server.
    ///
    /// An empty listing is the normal no-resources case, not an error.
    pub async fn list_resources(&mut self) -> Result<Vec<ResourceDescriptor>> {
        self.ensure_initialized()?;
        let session = self.session_ref()?;

        let resources = match session.list_all_resources().await {
            Ok(resources) => resources,
            Err(ServiceError::UnexpectedResponse) => {
                let page = session
                    .list_resources(None)
                    .await
                    .map_err(|e| map_service_error("list_resources", e))?;
                page.resources
            }
            Err(e) => return Err(map_service_error("list_resources", e)),
        };

        Ok(resources
            .into_iter()
            .map(|resource| ResourceDescriptor {
                uri: resource.uri.clone(),
                name: resource.name.clone(),
                description: resource.description.clone(),
            })
            .collect())
    }

    /// List templated resources (URI templates) from the server.
    pub async fn list_resource_templates(&mut self) -> Result<Vec<ResourceTemplateDescriptor>> {
        self.ensure_initialized()?;
        let session = self.session_ref()?;

        let templates = match session.list_all_resource_templates().await {
            Ok(templates) => templates,
            Err(ServiceError::UnexpectedResponse) => {
                let page = session
                    .list_resource_templates(None)
                    .await
                    .map_err(|e| map_service_error("list_resource_templates", e))?;
                page.resource_templates
            }
            Err(e) => return Err(map_service_error("list_resource_templates", e)),
        };

        Ok(templates
            .into_iter()
            .map(|template| ResourceTemplateDescriptor {
                uri_template: template.uri_template.clone(),
                name: template.name.clone(),
                description: template.description.clone(),
            })
            .collect())
    }

    /// Read a resource by URI and return its joined text content.
    pub async fn read_resource(&mut self, uri: &str) -> Result<String> {
        self.ensure_initialized()?;
        let session = self.session_ref()?;

        let result = session
            .read_resource(ReadResourceRequestParams {
                meta: None,
                uri: uri.to_owned(),
            })
            .await
            .map_err(|e| map_service_error("read_resource", e))?;

        let mut lines = Vec::new();
        for item in &result.contents {
            if let ResourceContents::TextResourceContents { text, .. } = item {
                lines.push(text.clone());
            }
        }

        if lines.is_empty() {
            return Err(BridgeError::Protocol {
                context: "read_resource".into(),
                message: format!("resource {uri} has no text content"),
            });
        }
        Ok(lines.join("\n"))
    }

    /// Execute a tool on the server.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolCallOutput> {
        self.ensure_initialized()?;
        let session = self.session_ref()?;
        let arguments = coerce_tool_arguments(arguments)?;

        let result = session
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_owned().into(),
                arguments,
                task: None,
            })
            .await
            .map_err(|e| map_service_error("call_tool", e))?;

        map_call_result(name, result)
    }

    /// Close the session, cancelling the running service.
    pub async fn close(mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session
                .cancel()
                .await
                .map_err(|e| BridgeError::Connection(format!("MCP close failed: {e}")))?;
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        match self.state {
            ConnectionState::Initialized => Ok(()),
            ConnectionState::Closed => Err(BridgeError::Connection("MCP session is closed".into())),
            _ => Err(BridgeError::InvalidState(
                "MCP client must be initialized first".into(),
            )),
        }
    }

    fn session_ref(&mut self) -> Result<&mut McpRunningService> {
        self.session
            .as_mut()
            .ok_or_else(|| BridgeError::Connection("missing MCP session".into()))
    }
}

fn map_tool_descriptor(tool: rmcp::model::Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()),
        input_schema: serde_json::Value::Object((*tool.input_schema).clone()),
    }
}

fn coerce_tool_arguments(value: serde_json::Value) -> Result<Option<JsonObject>> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) => Ok(Some(map)),
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let parsed: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
                BridgeError::InvalidArgument(format!("tool arguments must be valid JSON: {e}"))
            })?;
            coerce_tool_arguments(parsed)
        }
        other => Err(BridgeError::InvalidArgument(format!(
            "tool arguments must be a JSON object; got {other}"
        ))),
    }
}

fn extract_text_content(content: &[Content]) -> Option<String> {
    let mut lines = Vec::new();
    for item in content {
        if let Some(text) = item.as_text() {
            lines.push(text.text.clone());
            continue;
        }
        if let Some(resource) = item.as_resource() {
            if let ResourceContents::TextResourceContents { text, .. } = &resource.resource {
                lines.push(text.clone());
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn map_call_result(name: &str, result: CallToolResult) -> Result<ToolCallOutput> {
    let text_content = extract_text_content(&result.content);
    let content = result
        .content
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect::<Vec<_>>();

    if result.is_error.unwrap_or(false) {
        let message = result
            .structured_content
            .as_ref()
            .map(|v| v.to_string())
            .or_else(|| text_content.clone())
            .unwrap_or_else(|| "tool returned an error result".into());

        return Err(BridgeError::ToolInvocation {
            tool_name: name.to_string(),
            message,
        });
    }

    Ok(ToolCallOutput {
        structured_content: result.structured_content,
        text_content,
        content,
    })
}

fn map_client_initialize_error(error: ClientInitializeError) -> BridgeError {
    match error {
        ClientInitializeError::ConnectionClosed(context) => {
            BridgeError::Connection(format!("MCP initialize connection closed: {context}"))
        }
        ClientInitializeError::TransportError { error, context } => BridgeError::Connection(
            format!("MCP initialize transport error ({context}): {error}"),
        ),
        ClientInitializeError::JsonRpcError(error) => BridgeError::Protocol {
            context: "initialize".into(),
            message: format!("JSON-RPC error {}: {}", error.code.0, error.message),
        },
        ClientInitializeError::Cancelled => {
            BridgeError::Connection("MCP initialize cancelled".into())
        }
        other => BridgeError::Protocol {
            context: "initialize".into(),
            message: format!("MCP initialize error: {other}"),
        },
    }
}

fn map_service_error(context: &str, error: ServiceError) -> BridgeError {
    match error {
        ServiceError::McpError(error) => BridgeError::Protocol {
            context: context.to_string(),
            message: format!("MCP error {}: {}", error.code.0, error.message),
        },
        ServiceError::TransportSend(error) => {
            BridgeError::Connection(format!("{context}: MCP transport send failed: {error}"))
        }
        ServiceError::TransportClosed => {
            BridgeError::Connection(format!("{context}: MCP transport closed"))
        }
        ServiceError::UnexpectedResponse => BridgeError::Protocol {
            context: context.to_string(),
            message: "unexpected MCP response".into(),
        },
        ServiceError::Cancelled { reason } => {
            let suffix = reason
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default();
            BridgeError::Connection(format!("{context}: MCP request cancelled{suffix}"))
        }
        ServiceError::Timeout { timeout } => BridgeError::Timeout(timeout.as_millis() as u64),
        other => BridgeError::Protocol {
            context: context.to_string(),
            message: format!("MCP service error: {other}"),
        },
    }
}
