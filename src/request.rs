//! Request construction for the `/v1/git` resource tree.
//!
//! Each function maps one operation's payload to the exact [`ApiRequest`]
//! sent to the backend. They are pure: the same input always yields an equal
//! request, and nothing here touches the network.

use reqwest::Method;
use serde_json::{json, Value};

use crate::error::Error;
use crate::types::{
    CommitPayload, ConnectPayload, GitConfig, GitStatusPayload, MergeBranchPayload,
    MergeStatusPayload, PushPayload,
};

/// Base path of the git sync resource tree.
pub const BASE_PATH: &str = "/v1/git";

/// A fully described HTTP call, independent of any HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path with dynamic segments already percent-encoded
    pub path: String,
    /// Query parameters, unencoded, in insertion order
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Render `path` plus the percent-encoded query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

fn app_path(resource: &str, application_id: &str) -> String {
    format!(
        "{BASE_PATH}/{resource}/{}",
        urlencoding::encode(application_id)
    )
}

/// `POST /commit/{appId}?branchName=` with `{commitMessage, doPush}`.
pub fn commit(payload: &CommitPayload) -> ApiRequest {
    ApiRequest::new(Method::POST, app_path("commit", &payload.application_id))
        .query("branchName", &payload.branch)
        .body(json!({
            "commitMessage": payload.commit_message,
            "doPush": payload.do_push,
        }))
}

/// `POST /push/{appId}?branchName=`, no body.
pub fn push(payload: &PushPayload) -> ApiRequest {
    ApiRequest::new(Method::POST, app_path("push", &payload.application_id))
        .query("branchName", &payload.branch)
}

/// `POST /merge/{appId}` with `{sourceBranch, destinationBranch}`.
pub fn merge(payload: &MergeBranchPayload) -> ApiRequest {
    ApiRequest::new(Method::POST, app_path("merge", &payload.application_id)).body(json!({
        "sourceBranch": payload.source_branch,
        "destinationBranch": payload.destination_branch,
    }))
}

/// `GET /merge/status/{appId}?sourceBranch=&destinationBranch=`.
pub fn merge_status(payload: &MergeStatusPayload) -> ApiRequest {
    ApiRequest::new(
        Method::GET,
        app_path("merge/status", &payload.application_id),
    )
    .query("sourceBranch", &payload.source_branch)
    .query("destinationBranch", &payload.destination_branch)
}

/// `POST /connect/{appId}` with the whole connect payload as body.
///
/// # Errors
///
/// Returns `Error::Serialization` if the payload cannot be encoded.
pub fn connect(payload: &ConnectPayload, application_id: &str) -> Result<ApiRequest, Error> {
    Ok(
        ApiRequest::new(Method::POST, app_path("connect", application_id))
            .body(serde_json::to_value(payload)?),
    )
}

/// `GET /profile/default`.
pub fn global_config() -> ApiRequest {
    ApiRequest::new(Method::GET, format!("{BASE_PATH}/profile/default"))
}

/// `POST /profile/default` with the config as body.
///
/// # Errors
///
/// Returns `Error::Serialization` if the config cannot be encoded.
pub fn set_global_config(config: &GitConfig) -> Result<ApiRequest, Error> {
    Ok(
        ApiRequest::new(Method::POST, format!("{BASE_PATH}/profile/default"))
            .body(serde_json::to_value(config)?),
    )
}

/// `GET /branch/{appId}`.
pub fn fetch_branches(application_id: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, app_path("branch", application_id))
}

/// `GET /checkout-branch/{appId}`.
pub fn checkout_branch(application_id: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, app_path("checkout-branch", application_id))
}

/// `POST /create-branch/{appId}` with `{branchName}`.
pub fn create_branch(application_id: &str, branch: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, app_path("create-branch", application_id))
        .body(json!({ "branchName": branch }))
}

/// `GET /profile/{appId}`.
pub fn local_config(application_id: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, app_path("profile", application_id))
}

/// `PUT /profile/{appId}` with the config as body.
///
/// # Errors
///
/// Returns `Error::Serialization` if the config cannot be encoded.
pub fn set_local_config(config: &GitConfig, application_id: &str) -> Result<ApiRequest, Error> {
    Ok(
        ApiRequest::new(Method::PUT, app_path("profile", application_id))
            .body(serde_json::to_value(config)?),
    )
}

/// `GET /status/{appId}?branchName=`.
pub fn git_status(payload: &GitStatusPayload) -> ApiRequest {
    ApiRequest::new(Method::GET, app_path("status", &payload.application_id))
        .query("branchName", &payload.branch)
}
