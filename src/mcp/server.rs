use crate::api::ApiClient;
use crate::error::Error;
use crate::mcp::tools;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, InitializeResult,
    JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ServerHandler, ServiceExt};
use serde_json::Value;
use std::sync::Arc;

/// MCP server exposing the passport constraint and cumulative state tools.
///
/// Holds no state of its own beyond the injected API client; every tool call
/// is an independent request/response round trip.
pub struct McpServer<C: ApiClient> {
    api: Arc<C>,
}

impl<C: ApiClient + 'static> McpServer<C> {
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    pub async fn run_stdio(self) -> anyhow::Result<()> {
        use tokio::io::{stdin, stdout};

        let transport = (stdin(), stdout());

        // Start MCP server with stdio transport
        let server = self.serve(transport).await?;

        // Wait for shutdown signal (blocks until server terminates)
        server.waiting().await?;

        Ok(())
    }

    /// Look up the handler for `name` and run it against the injected client.
    ///
    /// Kept separate from [`ServerHandler::call_tool`] so dispatch is
    /// testable without a protocol request context.
    pub async fn dispatch(&self, name: &str, args: JsonObject) -> Result<Value, Error> {
        let handler =
            tools::handler(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        handler(self.api.as_ref(), args).await
    }
}

impl From<Error> for ErrorData {
    fn from(error: Error) -> Self {
        match error {
            Error::UnknownTool(_) | Error::InvalidInput(_) => {
                ErrorData::invalid_params(error.to_string(), None)
            }
            _ => ErrorData::internal_error(error.to_string(), None),
        }
    }
}

impl<C: ApiClient + 'static> ServerHandler for McpServer<C> {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "passport-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Passport MCP Connector - manage passport constraints and cumulative state"
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: tools::registry(),
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        let value = self.dispatch(&request.name, args).await?;

        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
