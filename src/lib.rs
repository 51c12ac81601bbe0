//! PomoDash MCP adapter.
//!
//! Exposes the PomoDash task, note and category REST API as MCP tools.
//! Tool calls are validated, forwarded to the backend over HTTP and the JSON
//! responses are rendered as plain text blocks for the agent.

pub mod backend;
pub mod config;
pub mod mcp;
pub mod serde_utils;
pub mod transport;

#[cfg(test)]
mod test_support;
