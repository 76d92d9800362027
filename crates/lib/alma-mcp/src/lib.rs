//! MCP server implementation for alma-schema-mcp.
//!
//! This crate wires the schema API gateway into rmcp tool handlers and
//! exposes the MCP-facing tool surface for database schema introspection.

mod tools;
pub mod server;

use std::sync::Arc;

use alma_core::gateway::SchemaGateway;
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool_handler,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use serde_json::Value;

const SERVER_INSTRUCTIONS: &str = r"alma-schema-mcp provides MCP tools for inspecting the schemas of Alma-managed mongo databases.

Workflow:
1. Call `database-context` with a database name for tenant-level context about that database.
2. Call `list-collection-schemas` to see which collection schemas the database holds.
3. Call `get-collection-schema` with a database and collection to fetch one JSON schema.
4. When the exact collection name is unknown, call `search-collections`; exact name matches
   come first and the API falls back to fuzzy matching with similarity-ranked candidates.

Notes:
- Every tool requires the target `database` name; schemas are scoped per database.
- JSON payloads are returned inside fenced ```json blocks within the response text.
- Failures (unreachable API, unknown database or collection) are reported in the response
  text rather than as protocol errors.";

/// MCP server wrapper around the schema API gateway and tool routers.
#[derive(Clone)]
pub struct AlmaMcp {
    tool_router: ToolRouter<Self>,
    gateway: Arc<SchemaGateway>,
}

impl AlmaMcp {
    /// Creates a new server owning its gateway.
    #[must_use]
    pub fn new(gateway: SchemaGateway) -> Self {
        Self::with_gateway(Arc::new(gateway))
    }

    /// Creates a new server using a shared gateway handle.
    #[must_use]
    pub fn with_gateway(gateway: Arc<SchemaGateway>) -> Self {
        let tool_router =
            Self::tool_router_context() + Self::tool_router_schema() + Self::tool_router_search();
        Self {
            tool_router,
            gateway,
        }
    }

    /// Fetches from the schema API and renders the outcome as one text block.
    ///
    /// This is the failure-containment boundary shared by every tool: gateway
    /// failures and payload-decode failures are rendered through `on_error`
    /// into explanatory text, so no invocation ever surfaces a protocol fault.
    pub(crate) async fn gateway_call<F>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        on_error: fn(&str) -> String,
        render: F,
    ) -> CallToolResult
    where
        F: FnOnce(Value) -> Result<String, String>,
    {
        let text = match self.gateway.fetch(path, query).await {
            Ok(payload) => match render(payload) {
                Ok(text) => text,
                Err(detail) => on_error(&detail),
            },
            Err(err) => on_error(err.detail()),
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

#[tool_handler]
impl ServerHandler for AlmaMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use alma_core::gateway::GatewayConfig;

    use super::*;

    fn service() -> AlmaMcp {
        let gateway =
            SchemaGateway::new(GatewayConfig::default()).expect("default gateway should build");
        AlmaMcp::new(gateway)
    }

    #[test]
    fn router_registers_all_four_tools() {
        let service = service();
        let mut names: Vec<String> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "database-context",
                "get-collection-schema",
                "list-collection-schemas",
                "search-collections",
            ]
        );
    }

    #[test]
    fn tool_schemas_declare_required_string_arguments() {
        let service = service();
        for tool in service.tool_router.list_all() {
            let schema =
                serde_json::to_value(tool.input_schema.as_ref()).expect("schema should serialize");
            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|entries| entries.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            let expected: &[&str] = match tool.name.as_ref() {
                "get-collection-schema" => &["collection", "database"],
                "search-collections" => &["database", "search"],
                _ => &["database"],
            };
            let mut required = required;
            required.sort_unstable();
            assert_eq!(required, expected, "tool {} argument schema", tool.name);

            for field in expected {
                assert_eq!(
                    schema["properties"][*field]["type"].as_str(),
                    Some("string"),
                    "tool {} field {field} should be a string",
                    tool.name
                );
            }
        }
    }
}
