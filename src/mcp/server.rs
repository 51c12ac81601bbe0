//! MCP server implementation
//!
//! The server owns one handler struct per resource group and a single routing
//! table merged from the per-group tool routers.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext},
    model::{
        CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::debug;

use crate::backend::BackendClient;

use super::registry::{RegistryError, ResourceGroup, ToolName};
use super::tools::{CategoryTools, NoteTools, TaskTools};

const INSTRUCTIONS: &str = "PomoDash MCP Server - Manage tasks, notes, categories and projects. \
Use list_note_references to find task and project IDs, then create_note_for_task or \
create_note_for_project to attach notes. Use create_task_for_project to add a task to a project.";

/// Main MCP server coordinator
///
/// The server delegates to separate tool structs, each responsible for one
/// resource group:
/// - TaskTools: task operations
/// - NoteTools: note operations, including linked notes
/// - CategoryTools: category and project operations
#[derive(Clone)]
pub struct McpServer {
    pub(crate) tasks: TaskTools,
    pub(crate) notes: NoteTools,
    pub(crate) categories: CategoryTools,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the given backend
    ///
    /// Fails when the tool routing table is inconsistent with [`ToolName`].
    pub fn new(backend: BackendClient) -> Result<Self, RegistryError> {
        let backend = Arc::new(backend);

        Ok(Self {
            tasks: TaskTools::new(Arc::clone(&backend)),
            notes: NoteTools::new(Arc::clone(&backend)),
            categories: CategoryTools::new(Arc::clone(&backend)),
            tool_router: Self::merged_router()?,
        })
    }

    fn group_router(group: ResourceGroup) -> ToolRouter<Self> {
        match group {
            ResourceGroup::Tasks => Self::task_router(),
            ResourceGroup::Notes => Self::note_router(),
            ResourceGroup::Categories => Self::category_router(),
        }
    }

    /// Merge the per-group routers into one name -> handler table.
    fn merged_router() -> Result<ToolRouter<Self>, RegistryError> {
        let mut merged = ToolRouter::new();

        for group in ResourceGroup::ALL {
            let router = Self::group_router(group);
            for tool in router.list_all() {
                let name: ToolName = tool.name.parse()?;
                if name.group() != group {
                    return Err(RegistryError::MisplacedTool {
                        tool: name,
                        expected: name.group(),
                        actual: group,
                    });
                }
                if merged.has_route(&tool.name) {
                    return Err(RegistryError::DuplicateTool {
                        name: tool.name.to_string(),
                    });
                }
            }
            merged.merge(router);
        }

        if let Some(tool) = ToolName::ALL
            .into_iter()
            .find(|tool| !merged.has_route(tool.as_str()))
        {
            return Err(RegistryError::MissingHandler { tool });
        }

        debug!(tools = ToolName::ALL.len(), "tool routing table built");
        Ok(merged)
    }

    /// Advertised tools, ordered tasks, notes, categories.
    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = self.tool_router.list_all();
        tools.sort_by_key(|tool| {
            ToolName::ALL
                .iter()
                .position(|name| name.as_str() == tool.name)
                .unwrap_or(usize::MAX)
        });
        tools
    }
}

// `tools/list` is served in group order, so the handler is spelled out.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_instructions(INSTRUCTIONS)
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tool_router.get(name).cloned()
    }
}
