//! MCP tool modules.
//!
//! Tools are grouped by concern: database context, collection schemas, and
//! similarity search over collection names.

mod context;
mod schema;
mod search;
