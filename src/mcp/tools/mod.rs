//! MCP tool implementations
//!
//! One module per resource group. Each module holds the typed parameter
//! structs, a handler struct that talks to the backend and renders text, and
//! the `#[tool]` descriptors registered on [`McpServer`](super::McpServer).

pub mod categories;
pub mod notes;
pub mod tasks;

#[cfg(test)]
mod categories_test;

pub use categories::CategoryTools;
pub use notes::NoteTools;
pub use tasks::TaskTools;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use miette::Diagnostic;
use rmcp::model::{CallToolResult, Content};
use thiserror::Error;
use tracing::warn;

use crate::backend::models::{Category, CategoryList, Task, TaskList};
use crate::backend::{BackendClient, BackendError, Resource};
use crate::mcp::ToolName;

/// Prefix of every rendered failure
pub const ERROR_MARKER: &str = "❌ Error: ";

/// Note content longer than this many characters is cut and marked with `...`
pub const CONTENT_PREVIEW_CHARS: usize = 150;

/// Failures inside a tool handler. Always rendered as text, never returned to the host.
#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] BackendError),

    #[error("{kind} with ID {id} not found")]
    #[diagnostic(code(pomodash_mcp::tools::reference_not_found))]
    ReferenceNotFound { kind: &'static str, id: String },

    #[error("Invalid argument '{field}': {message}")]
    #[diagnostic(code(pomodash_mcp::tools::invalid_argument))]
    InvalidArgument { field: &'static str, message: String },
}

impl ToolError {
    pub fn user_message(&self) -> String {
        match self {
            ToolError::Backend(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Turn a handler outcome into a single text block.
pub(crate) fn render(tool: ToolName, outcome: ToolResult<String>) -> CallToolResult {
    render_with_prefix(tool, ERROR_MARKER, outcome)
}

pub(crate) fn render_with_prefix(
    tool: ToolName,
    prefix: &str,
    outcome: ToolResult<String>,
) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            warn!(%tool, group = %tool.group(), error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(format!(
                "{}{}",
                prefix,
                e.user_message()
            ))])
        }
    }
}

/// Reject blank required strings before any request is made.
pub(crate) fn require(field: &'static str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArgument {
            field,
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// First 150 characters of `content`, followed by `...` when anything was cut.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Calendar date of a backend timestamp (`YYYY-MM-DD`), or the raw text if it
/// is not a recognized timestamp.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().to_string();
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return dt.date().to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.to_string();
    }
    raw.to_string()
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Look up a task by id in the backend's current task list.
///
/// Advisory only: the task may be deleted before a dependent create lands.
pub(crate) async fn find_task(backend: &BackendClient, task_id: &str) -> ToolResult<Task> {
    let TaskList { tasks } = backend.get(Resource::Tasks, &[]).await?;
    tasks
        .into_iter()
        .find(|task| task.id == task_id)
        .ok_or_else(|| ToolError::ReferenceNotFound {
            kind: "Task",
            id: task_id.to_string(),
        })
}

/// Look up a project (not a plain category) by id.
pub(crate) async fn find_project(backend: &BackendClient, project_id: &str) -> ToolResult<Category> {
    let CategoryList { projects, .. } = backend.get(Resource::Categories, &[]).await?;
    projects
        .into_iter()
        .find(|project| project.id == project_id)
        .ok_or_else(|| ToolError::ReferenceNotFound {
            kind: "Project",
            id: project_id.to_string(),
        })
}
