use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{BackendError, BackendResult};

/// Backend root used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://mcp.pomodash.mindsnapz.de";

/// One of the backend's resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tasks,
    Notes,
    Categories,
}

impl Resource {
    /// Path segment of the collection under the backend root
    pub fn base_path(self) -> &'static str {
        match self {
            Resource::Tasks => "tasks",
            Resource::Notes => "notes",
            Resource::Categories => "categories",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_path())
    }
}

/// Authenticated HTTP client for the PomoDash backend.
///
/// Configuration is immutable after construction, so a single instance is
/// shared between all tool handlers behind an `Arc`.
#[derive(Debug)]
pub struct BackendClient {
    root: Url,
    api_key: String,
    client: Client,
}

impl BackendClient {
    /// Create a client for `root` authenticating with `api_key`.
    ///
    /// Fails when the credential is blank or the root is not an absolute
    /// URL that can carry path segments.
    pub fn new(root: &str, api_key: &str) -> BackendResult<Self> {
        if api_key.trim().is_empty() {
            return Err(BackendError::MissingCredential);
        }

        let url = Url::parse(root).map_err(|e| BackendError::InvalidUrl {
            url: root.to_string(),
            message: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl {
                url: root.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            root: url,
            api_key: api_key.to_string(),
            client: Client::new(),
        })
    }

    /// Get the backend root being used
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Build the URL for `segments` below the resource's base path.
    ///
    /// Segments are percent-encoded, so ids containing `/` or `?` stay a
    /// single path segment.
    pub fn url(&self, resource: Resource, segments: &[&str]) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push(resource.base_path())
                .extend(segments);
        }
        url
    }

    /// Issue a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        segments: &[&str],
    ) -> BackendResult<T> {
        self.send(Method::GET, resource, segments, None::<&()>).await
    }

    /// Issue a POST request with a JSON body and decode the JSON response
    pub async fn post<B, T>(&self, resource: Resource, segments: &[&str], body: &B) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, resource, segments, Some(body)).await
    }

    /// Issue a PUT request with a JSON body and decode the JSON response
    pub async fn put<B, T>(&self, resource: Resource, segments: &[&str], body: &B) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, resource, segments, Some(body)).await
    }

    /// Issue a DELETE request and decode the JSON body (empty bodies decode as `null`)
    pub async fn delete<T: DeserializeOwned>(
        &self,
        resource: Resource,
        segments: &[&str],
    ) -> BackendResult<T> {
        self.send(Method::DELETE, resource, segments, None::<&()>).await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        resource: Resource,
        segments: &[&str],
        body: Option<&B>,
    ) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(resource, segments);
        debug!(%method, %url, "backend request");

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle a backend response with standardized error handling
    ///
    /// Returns the deserialized body on success, or a `BackendError::Status`
    /// carrying the body's `error` field on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                return Ok(serde_json::from_str("null")?);
            }
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            debug!(status = status.as_u16(), "backend returned an error status");
            Err(BackendError::Status {
                status: status.as_u16(),
                message: error_field(&bytes),
            })
        }
    }
}

/// Extract the string `error` field from a JSON error body.
pub(crate) fn error_field(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
