//! Request payloads for git sync operations.
//!
//! Field names follow the backend's camelCase wire format. Each payload is
//! built by the caller, sent once, and dropped.

use serde::{Deserialize, Serialize};

use super::profile::GitProfile;

/// Payload for committing the application's pending changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitPayload {
    /// Application the commit targets
    pub application_id: String,
    /// Commit message
    pub commit_message: String,
    /// Push to the remote right after committing
    pub do_push: bool,
    /// Branch to commit on
    pub branch: String,
}

/// Payload for pushing a branch to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    /// Application to push
    pub application_id: String,
    /// Branch to push
    pub branch: String,
}

/// Payload for merging one branch into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeBranchPayload {
    /// Application whose branches are merged
    pub application_id: String,
    /// Branch being merged
    pub source_branch: String,
    /// Branch receiving the merge
    pub destination_branch: String,
}

/// Payload for asking whether a merge can proceed.
///
/// Same shape as [`MergeBranchPayload`]; kept distinct so the two calls cannot
/// be swapped by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatusPayload {
    pub application_id: String,
    pub source_branch: String,
    pub destination_branch: String,
}

/// Payload for connecting an application to a remote repository.
///
/// Serialized verbatim as the request body. The optional flags are left out
/// of the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectPayload {
    /// SSH or HTTPS URL of the remote
    pub remote_url: String,
    /// Author identity used for commits on this application
    pub git_profile: GitProfile,
    /// Import the remote into a new application instead of connecting an existing one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_import: Option<bool>,
    /// Use the global default profile rather than `git_profile`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default_profile: Option<bool>,
}

impl ConnectPayload {
    /// Create a connect payload with both optional flags unset.
    pub fn new(remote_url: impl Into<String>, git_profile: GitProfile) -> Self {
        Self {
            remote_url: remote_url.into(),
            git_profile,
            is_import: None,
            is_default_profile: None,
        }
    }

    /// Set the import flag.
    #[must_use]
    pub fn with_import(mut self, is_import: bool) -> Self {
        self.is_import = Some(is_import);
        self
    }

    /// Set the default-profile flag.
    #[must_use]
    pub fn with_default_profile(mut self, is_default_profile: bool) -> Self {
        self.is_default_profile = Some(is_default_profile);
        self
    }
}

/// Parameters for reading the working tree status of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStatusPayload {
    pub application_id: String,
    pub branch: String,
}
