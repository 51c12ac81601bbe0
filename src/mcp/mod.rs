//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the PomoDash backend as MCP tools, served over stdio or
//! the Streamable HTTP transport.
//!
//! # Architecture
//!
//! - **server**: Main MCP server coordinator and routing table
//! - **registry**: Closed set of tool identifiers and their resource groups
//! - **tools**: Separate tool structs per resource group
//!   - TaskTools: Manages task operations
//!   - NoteTools: Manages note operations
//!   - CategoryTools: Manages category and project operations

mod registry;
pub mod server;
mod service;
pub mod tools;


pub use registry::{RegistryError, ResourceGroup, ToolName};
pub use server::McpServer;
pub use service::create_mcp_service;
