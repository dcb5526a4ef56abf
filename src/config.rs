//! Compile-time application configuration.
//!
//! The console recognizes three build-environment variables, mirroring the
//! deployment knobs of the admin API it talks to. Anything unset or
//! malformed falls back to the defaults below; no other runtime
//! configuration affects the client.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Configuration for the API client and credential storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the admin API, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u32,
    /// `localStorage` key under which the bearer token is persisted.
    pub token_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_owned(),
            request_timeout_ms: 30_000,
            token_storage_key: "admin_console_token".to_owned(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from `ADMIN_API_URL`, `ADMIN_API_TIMEOUT_MS`,
    /// and `ADMIN_TOKEN_KEY`, keeping defaults for anything absent or
    /// unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("ADMIN_API_URL") {
            config.api_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(timeout) = option_env!("ADMIN_API_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse::<u32>() {
                config.request_timeout_ms = ms;
            }
        }
        if let Some(key) = option_env!("ADMIN_TOKEN_KEY") {
            config.token_storage_key = key.to_owned();
        }
        config
    }
}
