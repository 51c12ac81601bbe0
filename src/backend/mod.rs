//! PomoDash backend client.
//!
//! The backend exposes three resource collections (`/tasks`, `/notes`,
//! `/categories`) under one root URL. Every request carries the bearer
//! credential; responses are JSON envelopes decoded into [`models`] types.

mod client;
mod error;
pub mod models;

#[cfg(test)]
mod client_test;

pub use client::{BackendClient, DEFAULT_API_URL, Resource};
pub use error::{BackendError, BackendResult};
