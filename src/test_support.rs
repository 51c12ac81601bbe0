//! In-process mock of the PomoDash backend for tests.
//!
//! Binds an axum server to `127.0.0.1:0`, answers each `(method, path)` with a
//! canned JSON response and records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{
        HeaderMap, HeaderName, Method, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::backend::BackendClient;
use crate::mcp::McpServer;

pub const TEST_API_KEY: &str = "test-key";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), (u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockBackend {
    url: String,
    state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    /// Spawn the mock server on an ephemeral port
    pub async fn start() -> Self {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle_request)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Answer `method path` with `status` and `body`; a `Value::Null` body is sent empty.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests matching `method path`
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(&self.url, TEST_API_KEY).unwrap()
    }

    pub fn server(&self) -> McpServer {
        McpServer::new(self.client()).unwrap()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: serde_json::from_slice(&body).ok(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
    };
    let key = (recorded.method.clone(), recorded.path.clone());
    state.requests.lock().unwrap().push(recorded);

    let route = state.routes.lock().unwrap().get(&key).cloned();
    match route {
        Some((status, Value::Null)) => StatusCode::from_u16(status).unwrap().into_response(),
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("no mock route for {} {}", key.0, key.1)})),
        )
            .into_response(),
    }
}

/// Extract the text of the first content block
pub fn result_text(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

pub fn is_error(result: &rmcp::model::CallToolResult) -> bool {
    result.is_error == Some(true)
}
