//! Category and project tool implementations
//!
//! Projects are categories with `is_project` set; the backend returns the two
//! kinds as separate lists.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::models::{Category, CategoryEnvelope, CategoryList, NewCategory};
use crate::backend::{BackendClient, Resource};
use crate::mcp::tools::{ToolResult, or_dash, render, require};
use crate::mcp::{McpServer, ToolName};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCategoryParams {
    #[schemars(description = "Category/Project name (required)")]
    pub name: String,
    #[schemars(description = "Category color (default: #3b82f6)")]
    pub color: Option<String>,
    #[schemars(description = "Whether this is a project (default: false)")]
    pub is_project: Option<bool>,
}

/// Handlers for the categories resource group
#[derive(Clone)]
pub struct CategoryTools {
    backend: Arc<BackendClient>,
}

impl CategoryTools {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> ToolResult<String> {
        let CategoryList {
            categories,
            projects,
        } = self.backend.get(Resource::Categories, &[]).await?;

        if categories.is_empty() && projects.is_empty() {
            return Ok("🏷️ No categories or projects found.".to_string());
        }

        let mut sections = Vec::new();
        if !categories.is_empty() {
            sections.push(format_section("🏷️", "categories", &categories));
        }
        if !projects.is_empty() {
            sections.push(format_section("📁", "projects", &projects));
        }
        Ok(sections.join("\n\n"))
    }

    pub async fn create(&self, params: CreateCategoryParams) -> ToolResult<String> {
        require("name", &params.name)?;

        // Labelled from the request, not the response.
        let label = if params.is_project.unwrap_or(false) {
            "Project"
        } else {
            "Category"
        };

        let request = NewCategory {
            name: params.name,
            color: params.color,
            is_project: params.is_project,
        };
        let CategoryEnvelope { category } = self
            .backend
            .post(Resource::Categories, &[], &request)
            .await?;

        Ok(format!(
            "✅ {} created successfully!\n\nName: {}\nColor: {}",
            label,
            category.name,
            or_dash(category.color.as_deref()),
        ))
    }
}

fn format_section(icon: &str, label: &str, entries: &[Category]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|c| {
            format!(
                "{} {} ({})\n   Color: {}",
                icon,
                c.name,
                c.id,
                or_dash(c.color.as_deref())
            )
        })
        .collect();

    format!(
        "{} Found {} {}:\n\n{}",
        icon,
        entries.len(),
        label,
        lines.join("\n\n")
    )
}

#[tool_router(router = category_router, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "List all categories and projects")]
    pub async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        Ok(render(ToolName::ListCategories, self.categories.list().await))
    }

    #[tool(description = "Create a new category or project")]
    pub async fn create_category(
        &self,
        params: Parameters<CreateCategoryParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render(
            ToolName::CreateCategory,
            self.categories.create(params.0).await,
        ))
    }
}
