use super::*;
use crate::backend::models::{NewTask, TaskEnvelope, TaskList};
use crate::test_support::{MockBackend, TEST_API_KEY};
use serde::de::IgnoredAny;
use serde_json::json;

// Initialize crypto provider once for all tests
fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[test]
fn test_new_rejects_blank_credential() {
    init_crypto();
    let err = BackendClient::new(DEFAULT_API_URL, "   ").unwrap_err();
    assert!(matches!(err, BackendError::MissingCredential));
}

#[test]
fn test_new_rejects_relative_url() {
    init_crypto();
    let err = BackendClient::new("not a url", TEST_API_KEY).unwrap_err();
    assert!(matches!(err, BackendError::InvalidUrl { .. }));

    let err = BackendClient::new("mailto:someone@example.com", TEST_API_KEY).unwrap_err();
    assert!(matches!(err, BackendError::InvalidUrl { .. }));
}

#[test]
fn test_url_joins_resource_and_segments() {
    init_crypto();
    let client = BackendClient::new("https://api.example.com/v1/", TEST_API_KEY).unwrap();

    assert_eq!(
        client.url(Resource::Tasks, &[]).as_str(),
        "https://api.example.com/v1/tasks"
    );
    assert_eq!(
        client.url(Resource::Notes, &["n1"]).as_str(),
        "https://api.example.com/v1/notes/n1"
    );
}

#[test]
fn test_url_encodes_ids() {
    init_crypto();
    let client = BackendClient::new(DEFAULT_API_URL, TEST_API_KEY).unwrap();
    let url = client.url(Resource::Tasks, &["a/b?c"]);
    assert_eq!(url.path(), "/tasks/a%2Fb%3Fc");
}

#[tokio::test]
async fn test_get_sends_credential_and_decodes_body() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond(
        "GET",
        "/tasks",
        200,
        json!({"tasks": [{"id": 1, "title": "Write report", "status": "pending"}]}),
    );

    let list: TaskList = mock.client().get(Resource::Tasks, &[]).await.unwrap();
    assert_eq!(list.tasks.len(), 1);
    assert_eq!(list.tasks[0].id, "1");

    let requests = mock.requests_to("GET", "/tasks");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer test-key")
    );
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_post_sends_json_body() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond(
        "POST",
        "/tasks",
        201,
        json!({"task": {"id": "t1", "title": "Write report"}}),
    );

    let request = NewTask {
        title: "Write report".to_string(),
        ..Default::default()
    };
    let created: TaskEnvelope = mock
        .client()
        .post(Resource::Tasks, &[], &request)
        .await
        .unwrap();
    assert_eq!(created.task.title, "Write report");

    let requests = mock.requests_to("POST", "/tasks");
    assert_eq!(requests[0].body, Some(json!({"title": "Write report"})));
}

#[tokio::test]
async fn test_status_error_prefers_body_error_field() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond("PUT", "/tasks/missing", 404, json!({"error": "not found"}));

    let err = mock
        .client()
        .put::<_, TaskEnvelope>(Resource::Tasks, &["missing"], &json!({}))
        .await
        .unwrap_err();

    match &err {
        BackendError::Status { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message.as_deref(), Some("not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "not found");
}

#[tokio::test]
async fn test_status_error_without_body_uses_description() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond("GET", "/notes", 500, json!({"detail": "boom"}));

    let err = mock
        .client()
        .get::<IgnoredAny>(Resource::Notes, &[])
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_null() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond("DELETE", "/notes/n1", 204, serde_json::Value::Null);

    let body: serde_json::Value = mock
        .client()
        .delete(Resource::Notes, &["n1"])
        .await
        .unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_missing_envelope_key_is_invalid_response() {
    init_crypto();
    let mock = MockBackend::start().await;
    mock.respond("POST", "/notes", 200, json!({"ok": true}));

    let err = mock
        .client()
        .post::<_, crate::backend::models::NoteEnvelope>(Resource::Notes, &[], &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_backend_is_connection_failure() {
    init_crypto();
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BackendClient::new(&format!("http://{}", addr), TEST_API_KEY).unwrap();
    let err = client
        .get::<IgnoredAny>(Resource::Tasks, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::ConnectionFailed { .. }));
}
