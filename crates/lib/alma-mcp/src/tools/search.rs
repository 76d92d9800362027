use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use alma_core::format::{self, SearchResults};
use alma_core::gateway::paths;

use crate::AlmaMcp;

/// Parameters for searching collections by name.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCollectionsParams {
    /// The name of the database
    pub database: String,
    /// Search string to match against collection names
    pub search: String,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl AlmaMcp {
    #[tool(
        name = "search-collections",
        description = "Search for collections in a database by name. Falls back to a fuzzy search if no exact match is found."
    )]
    async fn search_collections(
        &self,
        Parameters(params): Parameters<SearchCollectionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .gateway_call(
                paths::DATABASE_COLLECTION_SEARCH,
                &[
                    ("database", params.database.as_str()),
                    ("search", params.search.as_str()),
                ],
                format::search_error,
                |payload| {
                    let results: SearchResults = serde_json::from_value(payload)
                        .map_err(|err| format!("unexpected search payload: {err}"))?;
                    Ok(format::search_results(
                        &params.database,
                        &params.search,
                        &results,
                    ))
                },
            )
            .await;
        Ok(response)
    }
}
