//! Tests for Category MCP tools

use crate::mcp::tools::categories::CreateCategoryParams;
use crate::test_support::{MockBackend, is_error, result_text};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_empty() {
    let mock = MockBackend::start().await;
    mock.respond(
        "GET",
        "/categories",
        200,
        json!({"categories": [], "projects": []}),
    );
    let server = mock.server();

    let result = server.list_categories().await.unwrap();

    assert_eq!(result_text(&result), "🏷️ No categories or projects found.");
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_renders_both_sections() {
    let mock = MockBackend::start().await;
    mock.respond(
        "GET",
        "/categories",
        200,
        json!({
            "categories": [{"id": 1, "name": "Work", "color": "#ef4444", "is_project": 0}],
            "projects": [{"id": 2, "name": "Launch", "color": "#3b82f6", "is_project": 1}]
        }),
    );
    let server = mock.server();

    let result = server.list_categories().await.unwrap();

    assert_eq!(
        result_text(&result),
        "🏷️ Found 1 categories:\n\n🏷️ Work (1)\n   Color: #ef4444\n\n\
         📁 Found 1 projects:\n\n📁 Launch (2)\n   Color: #3b82f6"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_omits_empty_section() {
    let mock = MockBackend::start().await;
    mock.respond(
        "GET",
        "/categories",
        200,
        json!({"categories": [{"id": "c1", "name": "Home"}]}),
    );
    let server = mock.server();

    let result = server.list_categories().await.unwrap();
    let text = result_text(&result);

    assert!(text.starts_with("🏷️ Found 1 categories:"));
    assert!(text.contains("Color: -"));
    assert!(!text.contains("projects"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_project_is_labelled_project() {
    let mock = MockBackend::start().await;
    mock.respond(
        "POST",
        "/categories",
        201,
        json!({"category": {"id": "p1", "name": "Launch", "color": "#3b82f6"}}),
    );
    let server = mock.server();

    let result = server
        .create_category(Parameters(CreateCategoryParams {
            name: "Launch".to_string(),
            color: None,
            is_project: Some(true),
        }))
        .await
        .unwrap();

    assert_eq!(
        result_text(&result),
        "✅ Project created successfully!\n\nName: Launch\nColor: #3b82f6"
    );
    assert_eq!(
        mock.requests_to("POST", "/categories")[0].body,
        Some(json!({"name": "Launch", "is_project": true}))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_category_is_labelled_category() {
    let mock = MockBackend::start().await;
    mock.respond(
        "POST",
        "/categories",
        201,
        json!({"category": {"id": "c2", "name": "Errands", "color": "#22c55e", "is_project": false}}),
    );
    let server = mock.server();

    let result = server
        .create_category(Parameters(CreateCategoryParams {
            name: "Errands".to_string(),
            color: Some("#22c55e".to_string()),
            is_project: None,
        }))
        .await
        .unwrap();

    assert!(result_text(&result).starts_with("✅ Category created successfully!"));
    assert_eq!(
        mock.requests_to("POST", "/categories")[0].body,
        Some(json!({"name": "Errands", "color": "#22c55e"}))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_category_backend_rejection() {
    let mock = MockBackend::start().await;
    mock.respond(
        "POST",
        "/categories",
        409,
        json!({"error": "Category already exists"}),
    );
    let server = mock.server();

    let result = server
        .create_category(Parameters(CreateCategoryParams {
            name: "Errands".to_string(),
            color: None,
            is_project: None,
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert_eq!(result_text(&result), "❌ Error: Category already exists");
}
