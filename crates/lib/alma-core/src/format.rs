//! Response text rendering for the schema tools.
//!
//! Every function here is pure: identical input yields byte-identical output,
//! which keeps the tool responses deterministic and directly assertable in
//! tests. JSON payloads are embedded as fenced `json` code blocks
//! pretty-printed with two-space indentation.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success payload of the collection search endpoint.
///
/// All fields are optional; the API omits whichever do not apply. `count` may
/// report a wider total than the returned page of matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub info: Option<String>,
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
    pub count: Option<u64>,
    pub warning: Option<String>,
}

/// One similarity-ranked collection match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMatch {
    pub collection: String,
    pub similarity: f64,
}

/// Renders the database context response: a header naming the database and
/// the context payload as fenced JSON.
pub fn database_context(database: &str, context: &Value) -> String {
    format!("Database Context for \"{database}\":\n{}", json_block(context))
}

/// Renders the collection schema listing: a header line, then each summary on
/// its own line in the order the API returned them.
pub fn collection_schemas(database: &str, schemas: &[String]) -> String {
    let mut text = format!("The available collection schemas in the \"{database}\" database are:\n");
    for schema in schemas {
        text.push_str(schema);
        text.push('\n');
    }
    text
}

/// Renders a single collection schema as fenced JSON.
pub fn collection_schema(schema: &Value) -> String {
    json_block(schema)
}

/// Renders the collection search response.
///
/// An `info` line leads when present. Non-empty matches render as a counted
/// header plus one similarity line per match; otherwise the API's `warning`
/// is emitted verbatim, or a generic no-match line when there is none.
pub fn search_results(database: &str, search: &str, results: &SearchResults) -> String {
    let mut text = String::new();
    if let Some(info) = &results.info {
        text.push_str(info);
        text.push_str("\n\n");
    }

    if results.matches.is_empty() {
        match &results.warning {
            Some(warning) => text.push_str(warning),
            None => {
                let _ = write!(
                    text,
                    "No collections matching \"{search}\" found in database \"{database}\"."
                );
            }
        }
        return text;
    }

    let count = results.count.unwrap_or(results.matches.len() as u64);
    let _ = writeln!(
        text,
        "Found {count} collection(s) matching \"{search}\" in database \"{database}\":\n"
    );
    for entry in &results.matches {
        let _ = writeln!(
            text,
            "- {} (similarity: {:.2})",
            entry.collection, entry.similarity
        );
    }
    text
}

/// Failure text for the database context tool.
pub fn database_context_error(detail: &str) -> String {
    format!("Error retrieving database context: {detail}")
}

/// Failure text for the collection schema listing tool.
pub fn collection_schemas_error(detail: &str) -> String {
    format!("Error retrieving collection schemas: {detail}")
}

/// Failure text for the single collection schema tool.
pub fn collection_schema_error(detail: &str) -> String {
    format!("Error retrieving schema: {detail}")
}

/// Failure text for the collection search tool.
pub fn search_error(detail: &str) -> String {
    format!("Error searching collections: {detail}")
}

fn json_block(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!("```json\n{pretty}\n```")
}
