use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use alma_core::format;
use alma_core::gateway::paths;

use crate::AlmaMcp;

/// Parameters for listing the collection schemas of a database.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListCollectionSchemasParams {
    /// The name of the database
    pub database: String,
}

/// Parameters for fetching one collection schema.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetCollectionSchemaParams {
    /// The name of the database
    pub database: String,
    /// The name of the collection
    pub collection: String,
}

#[tool_router(router = tool_router_schema, vis = "pub")]
impl AlmaMcp {
    #[tool(
        name = "list-collection-schemas",
        description = "Get a list of mongo collection schemas in the database"
    )]
    async fn list_collection_schemas(
        &self,
        Parameters(params): Parameters<ListCollectionSchemasParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .gateway_call(
                paths::DATABASE_COLLECTIONS,
                &[("database", params.database.as_str())],
                format::collection_schemas_error,
                |collections| {
                    let schemas: Vec<String> = serde_json::from_value(collections)
                        .map_err(|err| format!("unexpected collection list payload: {err}"))?;
                    Ok(format::collection_schemas(&params.database, &schemas))
                },
            )
            .await;
        Ok(response)
    }

    #[tool(
        name = "get-collection-schema",
        description = "Get the JSON schema for a specific mongo database collection"
    )]
    async fn get_collection_schema(
        &self,
        Parameters(params): Parameters<GetCollectionSchemaParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .gateway_call(
                paths::DATABASE_COLLECTION_SCHEMA,
                &[
                    ("database", params.database.as_str()),
                    ("collection", params.collection.as_str()),
                ],
                format::collection_schema_error,
                |schema| {
                    let title = schema
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or(params.collection.as_str());
                    let description = schema
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or("No description available");
                    debug!(collection = %params.collection, title, description, "collection schema retrieved");
                    Ok(format::collection_schema(&schema))
                },
            )
            .await;
        Ok(response)
    }
}
