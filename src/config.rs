use std::env;
use std::time::Duration;

use crate::error::Error;

/// Default server root when `GIT_SYNC_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root the `/v1/git` paths are appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bearer token attached to every request
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// * `GIT_SYNC_BASE_URL` - server root (default: `http://localhost:8080`)
    /// * `GIT_SYNC_TIMEOUT_SECS` - request timeout (default: 30)
    /// * `GIT_SYNC_AUTH_TOKEN` - optional bearer token
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let base_url = lookup("GIT_SYNC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("GIT_SYNC_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!("Invalid GIT_SYNC_TIMEOUT_SECS: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let auth_token = lookup("GIT_SYNC_AUTH_TOKEN").filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            auth_token,
        })
    }
}
