//! Backend error types.
//!
//! Uses miette for diagnostic output and thiserror for derive macros.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the PomoDash backend.
#[derive(Error, Diagnostic, Debug)]
pub enum BackendError {
    #[error("Backend credential is required")]
    #[diagnostic(
        code(pomodash_mcp::backend::missing_credential),
        help("Set POMODASH_API_KEY or pass --api-key.")
    )]
    MissingCredential,

    #[error("Invalid backend URL '{url}': {message}")]
    #[diagnostic(
        code(pomodash_mcp::backend::invalid_url),
        help("POMODASH_API_URL must be an absolute http(s) URL.")
    )]
    InvalidUrl { url: String, message: String },

    #[error("Failed to connect to backend: {source}")]
    #[diagnostic(code(pomodash_mcp::backend::connection_failed))]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed with status code {status}")]
    #[diagnostic(code(pomodash_mcp::backend::status))]
    Status {
        status: u16,
        /// The `error` field of the response body, when the backend sent one.
        message: Option<String>,
    },

    #[error("Invalid response from backend: {message}")]
    #[diagnostic(
        code(pomodash_mcp::backend::invalid_response),
        help("The backend returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },
}

impl BackendError {
    /// Message shown to the agent: the backend's own error text when present,
    /// otherwise the error description.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            BackendError::ConnectionFailed { source: e }
        } else {
            BackendError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
