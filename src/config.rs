//! Runtime configuration.
//!
//! The backend root and credential come from command-line flags, falling back
//! to environment variables. A missing credential is a startup failure.

use std::env;

use miette::Diagnostic;
use thiserror::Error;

use crate::backend::DEFAULT_API_URL;

/// Environment variable overriding the backend root URL
pub const API_URL_ENV: &str = "POMODASH_API_URL";
/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "POMODASH_API_KEY";

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("POMODASH_API_KEY environment variable is required")]
    #[diagnostic(
        code(pomodash_mcp::config::missing_api_key),
        help("Export POMODASH_API_KEY=<token> or pass --api-key <token>.")
    )]
    MissingApiKey,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
}

impl Config {
    /// Resolve configuration from explicit values and the process environment.
    ///
    /// Priority for each value:
    /// 1. Explicit parameter
    /// 2. Environment variable
    /// 3. Default (URL only: `https://mcp.pomodash.mindsnapz.de`)
    pub fn resolve(api_url: Option<String>, api_key: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve_with(api_url, api_key, |name| env::var(name).ok())
    }

    /// Same as [`Config::resolve`] with a custom variable lookup.
    pub fn resolve_with(
        api_url: Option<String>,
        api_key: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = non_blank(api_url)
            .or_else(|| non_blank(lookup(API_URL_ENV)))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = non_blank(api_key)
            .or_else(|| non_blank(lookup(API_KEY_ENV)))
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { api_url, api_key })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = Config::resolve_with(None, None, env_of(&[]));
        assert_eq!(result, Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let result = Config::resolve_with(None, Some("  ".into()), env_of(&[(API_KEY_ENV, "")]));
        assert_eq!(result, Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_defaults_url_when_unset() {
        let config = Config::resolve_with(None, None, env_of(&[(API_KEY_ENV, "secret")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_env_overrides_default_url() {
        let config = Config::resolve_with(
            None,
            None,
            env_of(&[(API_URL_ENV, "http://localhost:8787"), (API_KEY_ENV, "secret")]),
        )
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8787");
    }

    #[test]
    fn test_explicit_values_win_over_env() {
        let config = Config::resolve_with(
            Some("http://explicit:7777".into()),
            Some("flag-key".into()),
            env_of(&[(API_URL_ENV, "http://env:1"), (API_KEY_ENV, "env-key")]),
        )
        .unwrap();
        assert_eq!(config.api_url, "http://explicit:7777");
        assert_eq!(config.api_key, "flag-key");
    }
}
