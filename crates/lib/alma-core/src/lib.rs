//! Core gateway and formatting for alma-schema-mcp.
//!
//! This crate owns the outbound HTTP gateway to the Alma schema API and the
//! pure response formatters that turn API payloads into the text blocks the
//! MCP tools return.

pub mod format;
pub mod gateway;
