//! MCP tools for Task management.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use std::sync::Arc;

use crate::backend::models::{NewTask, Priority, Task, TaskEnvelope, TaskList, TaskStatus, TaskUpdate};
use crate::backend::{BackendClient, Resource};
use crate::mcp::{McpServer, ToolName};
use crate::mcp::tools::{ToolResult, find_project, format_date, or_dash, render, require};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "Task title (required)")]
    pub title: String,
    #[schemars(description = "Task description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Due date in ISO format (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "Task priority (default: medium)")]
    pub priority: Option<Priority>,
    #[schemars(description = "Start time for timeboxing, ISO format (optional)")]
    pub start_time: Option<String>,
    #[schemars(description = "End time for timeboxing, ISO format (optional)")]
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID to update (required)")]
    pub task_id: String,
    #[schemars(description = "New task title (optional)")]
    pub title: Option<String>,
    #[schemars(description = "New task description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "New task status (optional)")]
    pub status: Option<TaskStatus>,
    #[schemars(description = "New task priority (optional)")]
    pub priority: Option<Priority>,
    #[schemars(description = "New due date in ISO format (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "New start time, ISO format (optional)")]
    pub start_time: Option<String>,
    #[schemars(description = "New end time, ISO format (optional)")]
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    #[schemars(description = "Task ID to delete (required)")]
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskForProjectParams {
    #[schemars(description = "Task title (required)")]
    pub title: String,
    #[schemars(description = "Project ID to link task to (required). Use list_categories to find projects.")]
    pub project_id: String,
    #[schemars(description = "Task description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Task priority (optional)")]
    pub priority: Option<Priority>,
    #[schemars(description = "Due date in ISO format (optional)")]
    pub due_date: Option<String>,
}

// =============================================================================
// Task Tools
// =============================================================================

/// Handlers for the tasks resource group
#[derive(Clone)]
pub struct TaskTools {
    backend: Arc<BackendClient>,
}

impl TaskTools {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn create(&self, params: CreateTaskParams) -> ToolResult<String> {
        require("title", &params.title)?;

        let request = NewTask {
            title: params.title,
            description: params.description,
            due_date: params.due_date,
            priority: params.priority,
            start_time: params.start_time,
            end_time: params.end_time,
            project_id: None,
        };
        let TaskEnvelope { task } = self.backend.post(Resource::Tasks, &[], &request).await?;

        Ok(format!(
            "✅ Task created successfully!\n\nTitle: {}\nStatus: {}\nPriority: {}",
            task.title,
            or_dash(task.status.as_deref()),
            or_dash(task.priority.as_deref()),
        ))
    }

    pub async fn list(&self) -> ToolResult<String> {
        let TaskList { tasks } = self.backend.get(Resource::Tasks, &[]).await?;

        if tasks.is_empty() {
            return Ok("📝 No tasks found.".to_string());
        }

        let entries: Vec<String> = tasks.iter().map(format_task).collect();
        Ok(format!(
            "📝 Found {} tasks:\n\n{}",
            tasks.len(),
            entries.join("\n\n")
        ))
    }

    pub async fn update(&self, params: UpdateTaskParams) -> ToolResult<String> {
        require("task_id", &params.task_id)?;

        let changes = TaskUpdate {
            title: params.title,
            description: params.description,
            status: params.status,
            priority: params.priority,
            due_date: params.due_date,
            start_time: params.start_time,
            end_time: params.end_time,
        };
        let TaskEnvelope { task } = self
            .backend
            .put(Resource::Tasks, &[params.task_id.as_str()], &changes)
            .await?;

        Ok(format!(
            "✅ Task updated successfully!\n\nTitle: {}\nStatus: {}",
            task.title,
            or_dash(task.status.as_deref()),
        ))
    }

    pub async fn delete(&self, params: DeleteTaskParams) -> ToolResult<String> {
        require("task_id", &params.task_id)?;

        let _: IgnoredAny = self
            .backend
            .delete(Resource::Tasks, &[params.task_id.as_str()])
            .await?;

        Ok(format!(
            "✅ Task deleted successfully! (ID: {})",
            params.task_id
        ))
    }

    /// Create a task under a project, refusing locally when the project is unknown.
    pub async fn create_for_project(&self, params: CreateTaskForProjectParams) -> ToolResult<String> {
        require("title", &params.title)?;
        require("project_id", &params.project_id)?;

        let project = find_project(&self.backend, &params.project_id).await?;

        let request = NewTask {
            title: params.title,
            description: params.description,
            due_date: params.due_date,
            priority: params.priority,
            project_id: Some(params.project_id),
            ..Default::default()
        };
        let TaskEnvelope { task } = self.backend.post(Resource::Tasks, &[], &request).await?;

        Ok(format!(
            "✅ Task created for project!\n\nTitle: {}\nLinked to: {}\nStatus: {}\nPriority: {}",
            task.title,
            project.name,
            or_dash(task.status.as_deref()),
            or_dash(task.priority.as_deref()),
        ))
    }
}

fn format_task(task: &Task) -> String {
    let due = task
        .due_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(" | Due: {}", format_date(d)))
        .unwrap_or_default();

    format!(
        "📋 {} ({})\n   Status: {} | Priority: {}{}",
        task.title,
        task.id,
        or_dash(task.status.as_deref()),
        or_dash(task.priority.as_deref()),
        due
    )
}

// =============================================================================
// Tool descriptors
// =============================================================================

#[tool_router(router = task_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Create a new task in PomoDash")]
    pub async fn create_task(
        &self,
        params: Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::CreateTask, self.tasks.create(params.0).await))
    }

    #[tool(description = "List all tasks")]
    pub async fn list_tasks(&self) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::ListTasks, self.tasks.list().await))
    }

    #[tool(description = "Update an existing task. Only the provided fields are changed.")]
    pub async fn update_task(
        &self,
        params: Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::UpdateTask, self.tasks.update(params.0).await))
    }

    #[tool(description = "Delete a task")]
    pub async fn delete_task(
        &self,
        params: Parameters<DeleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::DeleteTask, self.tasks.delete(params.0).await))
    }

    #[tool(description = "Create a task linked to a specific project")]
    pub async fn create_task_for_project(
        &self,
        params: Parameters<CreateTaskForProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(
            ToolName::CreateTaskForProject,
            self.tasks.create_for_project(params.0).await,
        ))
    }
}
