use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use alma_core::format;
use alma_core::gateway::paths;

use crate::AlmaMcp;

/// Parameters for retrieving database context.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DatabaseContextParams {
    /// The name of the database
    pub database: String,
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl AlmaMcp {
    #[tool(
        name = "database-context",
        description = "Get the context information about a specific database"
    )]
    async fn database_context(
        &self,
        Parameters(params): Parameters<DatabaseContextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .gateway_call(
                paths::DATABASE_CONTEXT,
                &[("database", params.database.as_str())],
                format::database_context_error,
                |context| Ok(format::database_context(&params.database, &context)),
            )
            .await;
        Ok(response)
    }
}
