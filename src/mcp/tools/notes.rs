//! Note tool implementations
//!
//! Handles all MCP tools for note management, including notes linked to a
//! task or project. Linked creates check the referenced entity first and
//! never reach the create endpoint when it is missing.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

use crate::backend::models::{
    CategoryList, NewNote, Note, NoteEnvelope, NoteList, NoteUpdate, ReferenceType, TaskList,
};
use crate::backend::{BackendClient, Resource};
use crate::mcp::tools::{
    ToolResult, find_project, find_task, format_date, or_dash, render, render_with_prefix,
    require, truncate_content,
};
use crate::mcp::{McpServer, ToolName};

/// At most this many tasks and projects are listed by `list_note_references`
pub const REFERENCE_LIST_LIMIT: usize = 10;

/// Error prefix used by `list_note_references`
pub const REFERENCE_ERROR_MARKER: &str = "❌ Error loading references: ";

// Parameter types for tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    #[schemars(description = "Note content (required)")]
    pub content: String,
    #[schemars(description = "Type of reference (default: general)")]
    pub reference_type: Option<ReferenceType>,
    #[schemars(description = "Reference ID (default: general)")]
    pub reference_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    #[schemars(description = "Note ID to update (required)")]
    pub note_id: String,
    #[schemars(description = "New note content (optional)")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNoteParams {
    #[schemars(description = "Note ID to delete (required)")]
    pub note_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateNoteForTaskParams {
    #[schemars(description = "ID of the task to link the note to (required)")]
    pub task_id: String,
    #[schemars(description = "Note content (required)")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateNoteForProjectParams {
    #[schemars(description = "ID of the project to link the note to (required)")]
    pub project_id: String,
    #[schemars(description = "Note content (required)")]
    pub content: String,
}

/// Handlers for the notes resource group
#[derive(Clone)]
pub struct NoteTools {
    backend: Arc<BackendClient>,
}

impl NoteTools {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn create(&self, params: CreateNoteParams) -> ToolResult<String> {
        require("content", &params.content)?;

        let request = NewNote {
            content: params.content,
            reference_type: params.reference_type,
            reference_id: params.reference_id,
        };
        let NoteEnvelope { note } = self.backend.post(Resource::Notes, &[], &request).await?;

        Ok(format!(
            "✅ Note created successfully!\n\nContent: {}\nReference: {}",
            truncate_content(&note.content),
            or_dash(note.reference_type.as_deref()),
        ))
    }

    pub async fn list(&self) -> ToolResult<String> {
        let NoteList { notes } = self.backend.get(Resource::Notes, &[]).await?;

        if notes.is_empty() {
            return Ok("📚 No notes found.".to_string());
        }

        let entries: Vec<String> = notes.iter().map(format_note).collect();
        Ok(format!(
            "📚 Found {} notes:\n\n{}",
            notes.len(),
            entries.join("\n\n")
        ))
    }

    pub async fn update(&self, params: UpdateNoteParams) -> ToolResult<String> {
        require("note_id", &params.note_id)?;

        let changes = NoteUpdate {
            content: params.content,
        };
        let NoteEnvelope { note } = self
            .backend
            .put(Resource::Notes, &[params.note_id.as_str()], &changes)
            .await?;

        Ok(format!(
            "✅ Note updated successfully!\n\nContent: {}",
            truncate_content(&note.content)
        ))
    }

    pub async fn delete(&self, params: DeleteNoteParams) -> ToolResult<String> {
        require("note_id", &params.note_id)?;

        let _: IgnoredAny = self
            .backend
            .delete(Resource::Notes, &[params.note_id.as_str()])
            .await?;

        Ok(format!(
            "✅ Note deleted successfully! (ID: {})",
            params.note_id
        ))
    }

    pub async fn create_for_task(&self, params: CreateNoteForTaskParams) -> ToolResult<String> {
        require("task_id", &params.task_id)?;
        require("content", &params.content)?;

        let task = find_task(&self.backend, &params.task_id).await?;

        let request = NewNote {
            content: params.content,
            reference_type: Some(ReferenceType::Task),
            reference_id: Some(params.task_id),
        };
        let NoteEnvelope { note } = self.backend.post(Resource::Notes, &[], &request).await?;

        Ok(format!(
            "✅ Task note created successfully!\n\nLinked to: {}\nContent: {}",
            task.title,
            truncate_content(&note.content)
        ))
    }

    pub async fn create_for_project(&self, params: CreateNoteForProjectParams) -> ToolResult<String> {
        require("project_id", &params.project_id)?;
        require("content", &params.content)?;

        let project = find_project(&self.backend, &params.project_id).await?;

        let request = NewNote {
            content: params.content,
            reference_type: Some(ReferenceType::Project),
            reference_id: Some(params.project_id),
        };
        let NoteEnvelope { note } = self.backend.post(Resource::Notes, &[], &request).await?;

        Ok(format!(
            "✅ Project note created successfully!\n\nLinked to: {}\nContent: {}",
            project.name,
            truncate_content(&note.content)
        ))
    }

    /// List tasks and projects a note can be linked to.
    ///
    /// Both collections are fetched concurrently; the call fails if either fetch fails.
    pub async fn list_references(&self) -> ToolResult<String> {
        let (TaskList { tasks }, CategoryList { projects, .. }) = tokio::try_join!(
            self.backend.get::<TaskList>(Resource::Tasks, &[]),
            self.backend.get::<CategoryList>(Resource::Categories, &[]),
        )?;

        let mut out = String::new();

        if !tasks.is_empty() {
            out.push_str("📋 **Available Tasks:**\n");
            for task in tasks.iter().take(REFERENCE_LIST_LIMIT) {
                let _ = writeln!(out, "   • {} (ID: {})", task.title, task.id);
            }
            if tasks.len() > REFERENCE_LIST_LIMIT {
                let _ = writeln!(
                    out,
                    "   ... and {} more tasks",
                    tasks.len() - REFERENCE_LIST_LIMIT
                );
            }
            out.push('\n');
        }

        if !projects.is_empty() {
            out.push_str("📁 **Available Projects:**\n");
            for project in projects.iter().take(REFERENCE_LIST_LIMIT) {
                let _ = writeln!(out, "   • {} (ID: {})", project.name, project.id);
            }
            if projects.len() > REFERENCE_LIST_LIMIT {
                let _ = writeln!(
                    out,
                    "   ... and {} more projects",
                    projects.len() - REFERENCE_LIST_LIMIT
                );
            }
        }

        if out.is_empty() {
            return Ok("📝 No tasks or projects available for linking.".to_string());
        }

        out.push_str(
            "\n💡 Use `create_note_for_task` or `create_note_for_project` with the respective ID to create linked notes.",
        );
        Ok(out)
    }
}

fn format_note(note: &Note) -> String {
    let created = note
        .created_at
        .as_deref()
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "📝 {} ({})\n   Created: {}\n   Content: {}",
        or_dash(note.reference_type.as_deref()),
        note.id,
        created,
        truncate_content(&note.content)
    )
}

#[tool_router(router = note_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Create a new note in PomoDash")]
    pub async fn create_note(
        &self,
        params: Parameters<CreateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::CreateNote, self.notes.create(params.0).await))
    }

    #[tool(description = "List all notes")]
    pub async fn list_notes(&self) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::ListNotes, self.notes.list().await))
    }

    #[tool(description = "Update an existing note")]
    pub async fn update_note(
        &self,
        params: Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::UpdateNote, self.notes.update(params.0).await))
    }

    #[tool(description = "Delete a note")]
    pub async fn delete_note(
        &self,
        params: Parameters<DeleteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::DeleteNote, self.notes.delete(params.0).await))
    }

    #[tool(description = "Create a note linked to a specific task")]
    pub async fn create_note_for_task(
        &self,
        params: Parameters<CreateNoteForTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(
            ToolName::CreateNoteForTask,
            self.notes.create_for_task(params.0).await,
        ))
    }

    #[tool(description = "Create a note linked to a specific project")]
    pub async fn create_note_for_project(
        &self,
        params: Parameters<CreateNoteForProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(
            ToolName::CreateNoteForProject,
            self.notes.create_for_project(params.0).await,
        ))
    }

    #[tool(description = "List available tasks and projects for note linking")]
    pub async fn list_note_references(&self) -> Result<CallToolResult, McpError> {
        Ok(render_with_prefix(
            ToolName::ListNoteReferences,
            REFERENCE_ERROR_MARKER,
            self.notes.list_references().await,
        ))
    }
}
