//! Git profile models: author identity, global or per-application.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author identity sent when connecting an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitProfile {
    pub author_name: String,
    pub author_email: String,
}

impl GitProfile {
    pub fn new(author_name: impl Into<String>, author_email: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
        }
    }
}

/// Profile configuration stored by the backend.
///
/// Only the author identity is modelled. Any other fields the backend
/// includes are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    /// Commit author name
    #[serde(default)]
    pub author_name: String,
    /// Commit author email
    #[serde(default)]
    pub author_email: String,
    /// Backend-defined settings this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitConfig {
    /// Create a config carrying only an author identity.
    pub fn new(author_name: impl Into<String>, author_email: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            extra: Map::new(),
        }
    }
}

impl From<GitProfile> for GitConfig {
    fn from(profile: GitProfile) -> Self {
        Self::new(profile.author_name, profile.author_email)
    }
}
