//! Tool identifiers and their owning resource groups.
//!
//! Every tool the server advertises maps to exactly one [`ToolName`], and every
//! `ToolName` belongs to exactly one [`ResourceGroup`]. The server checks its
//! routing table against this list once at startup.

use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

/// A backend collection and the tools that operate on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceGroup {
    Tasks,
    Notes,
    Categories,
}

impl ResourceGroup {
    /// Routing priority order.
    pub const ALL: [ResourceGroup; 3] = [
        ResourceGroup::Tasks,
        ResourceGroup::Notes,
        ResourceGroup::Categories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceGroup::Tasks => "tasks",
            ResourceGroup::Notes => "notes",
            ResourceGroup::Categories => "categories",
        }
    }

    /// Tools owned by this group, in advertisement order
    pub fn tools(self) -> impl Iterator<Item = ToolName> {
        ToolName::ALL.into_iter().filter(move |tool| tool.group() == self)
    }
}

impl fmt::Display for ResourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every tool the adapter knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    CreateTask,
    ListTasks,
    UpdateTask,
    DeleteTask,
    CreateTaskForProject,
    CreateNote,
    ListNotes,
    UpdateNote,
    DeleteNote,
    CreateNoteForTask,
    CreateNoteForProject,
    ListNoteReferences,
    ListCategories,
    CreateCategory,
}

impl ToolName {
    pub const ALL: [ToolName; 14] = [
        ToolName::CreateTask,
        ToolName::ListTasks,
        ToolName::UpdateTask,
        ToolName::DeleteTask,
        ToolName::CreateTaskForProject,
        ToolName::CreateNote,
        ToolName::ListNotes,
        ToolName::UpdateNote,
        ToolName::DeleteNote,
        ToolName::CreateNoteForTask,
        ToolName::CreateNoteForProject,
        ToolName::ListNoteReferences,
        ToolName::ListCategories,
        ToolName::CreateCategory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::CreateTask => "create_task",
            ToolName::ListTasks => "list_tasks",
            ToolName::UpdateTask => "update_task",
            ToolName::DeleteTask => "delete_task",
            ToolName::CreateTaskForProject => "create_task_for_project",
            ToolName::CreateNote => "create_note",
            ToolName::ListNotes => "list_notes",
            ToolName::UpdateNote => "update_note",
            ToolName::DeleteNote => "delete_note",
            ToolName::CreateNoteForTask => "create_note_for_task",
            ToolName::CreateNoteForProject => "create_note_for_project",
            ToolName::ListNoteReferences => "list_note_references",
            ToolName::ListCategories => "list_categories",
            ToolName::CreateCategory => "create_category",
        }
    }

    pub fn group(self) -> ResourceGroup {
        match self {
            ToolName::CreateTask
            | ToolName::ListTasks
            | ToolName::UpdateTask
            | ToolName::DeleteTask
            | ToolName::CreateTaskForProject => ResourceGroup::Tasks,
            ToolName::CreateNote
            | ToolName::ListNotes
            | ToolName::UpdateNote
            | ToolName::DeleteNote
            | ToolName::CreateNoteForTask
            | ToolName::CreateNoteForProject
            | ToolName::ListNoteReferences => ResourceGroup::Notes,
            ToolName::ListCategories | ToolName::CreateCategory => ResourceGroup::Categories,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownTool {
                name: s.to_string(),
            })
    }
}

/// Routing and registry consistency errors.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown tool: {name}")]
    #[diagnostic(code(pomodash_mcp::registry::unknown_tool))]
    UnknownTool { name: String },

    #[error("Tool '{name}' is registered more than once")]
    #[diagnostic(code(pomodash_mcp::registry::duplicate_tool))]
    DuplicateTool { name: String },

    #[error("Tool '{tool}' belongs to the {expected} group but was registered under {actual}")]
    #[diagnostic(code(pomodash_mcp::registry::misplaced_tool))]
    MisplacedTool {
        tool: ToolName,
        expected: ResourceGroup,
        actual: ResourceGroup,
    },

    #[error("Tool '{tool}' has no handler")]
    #[diagnostic(code(pomodash_mcp::registry::missing_handler))]
    MissingHandler { tool: ToolName },
}
