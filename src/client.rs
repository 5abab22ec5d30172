//! Git sync client.
//!
//! One method per `/v1/git` endpoint. Every method builds its request with
//! [`crate::request`] and hands it to the injected [`Transport`]; the response
//! envelope comes back as-is.

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::request::{self, ApiRequest};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    ApiResponse, CommitPayload, ConnectPayload, GitConfig, GitStatusPayload, MergeBranchPayload,
    MergeStatusPayload, PushPayload,
};

/// Client for the git sync REST service.
///
/// Holds no state besides the transport, so it is cheap to clone and safe to
/// share across tasks. Calls are independent: callers that need ordering,
/// e.g. `commit` before `push`, must await one before issuing the next.
///
/// # Example
///
/// ```rust,ignore
/// use git_sync::{CommitPayload, GitSyncClient};
///
/// let client = GitSyncClient::from_env()?;
///
/// let response = client
///     .commit(&CommitPayload {
///         application_id: "app-1".to_string(),
///         commit_message: "Update queries".to_string(),
///         do_push: true,
///         branch: "main".to_string(),
///     })
///     .await?;
/// assert!(response.is_success());
/// ```
#[derive(Clone)]
pub struct GitSyncClient {
    transport: Arc<dyn Transport>,
}

impl GitSyncClient {
    /// Create a client over any transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or the HTTP client cannot be
    /// created.
    pub fn from_env() -> Result<Self, Error> {
        Self::with_config(&ClientConfig::from_env()?)
    }

    /// Get the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    async fn send(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<ApiResponse, Error> {
        debug!(operation, method = %request.method, path = %request.path, "git sync call");
        self.transport.execute(request).await
    }

    /// Commit pending changes on a branch, optionally pushing them.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn commit(&self, payload: &CommitPayload) -> Result<ApiResponse, Error> {
        self.send("commit", request::commit(payload)).await
    }

    /// Push a branch to the remote.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn push(&self, payload: &PushPayload) -> Result<ApiResponse, Error> {
        self.send("push", request::push(payload)).await
    }

    /// Merge `source_branch` into `destination_branch`.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn merge(&self, payload: &MergeBranchPayload) -> Result<ApiResponse, Error> {
        self.send("merge", request::merge(payload)).await
    }

    /// Check whether a merge between two branches can proceed.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn get_merge_status(
        &self,
        payload: &MergeStatusPayload,
    ) -> Result<ApiResponse, Error> {
        self.send("get_merge_status", request::merge_status(payload)).await
    }

    /// Connect an application to a remote repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the payload cannot be encoded, and
    /// propagates transport errors unchanged.
    pub async fn connect(
        &self,
        payload: &ConnectPayload,
        application_id: &str,
    ) -> Result<ApiResponse, Error> {
        self.send("connect", request::connect(payload, application_id)?).await
    }

    /// Read the global default profile.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn get_global_config(&self) -> Result<ApiResponse, Error> {
        self.send("get_global_config", request::global_config()).await
    }

    /// Replace the global default profile.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the config cannot be encoded, and
    /// propagates transport errors unchanged.
    pub async fn set_global_config(&self, config: &GitConfig) -> Result<ApiResponse, Error> {
        self.send("set_global_config", request::set_global_config(config)?).await
    }

    /// List the application's branches.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn fetch_branches(&self, application_id: &str) -> Result<ApiResponse, Error> {
        self.send("fetch_branches", request::fetch_branches(application_id)).await
    }

    /// Check out a branch of the application.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn checkout_branch(&self, application_id: &str) -> Result<ApiResponse, Error> {
        self.send("checkout_branch", request::checkout_branch(application_id)).await
    }

    /// Create a new branch.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn create_new_branch(
        &self,
        application_id: &str,
        branch: &str,
    ) -> Result<ApiResponse, Error> {
        self.send(
            "create_new_branch",
            request::create_branch(application_id, branch),
        )
        .await
    }

    /// Read the application's own profile.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn get_local_config(&self, application_id: &str) -> Result<ApiResponse, Error> {
        self.send("get_local_config", request::local_config(application_id)).await
    }

    /// Replace the application's own profile.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the config cannot be encoded, and
    /// propagates transport errors unchanged.
    pub async fn set_local_config(
        &self,
        config: &GitConfig,
        application_id: &str,
    ) -> Result<ApiResponse, Error> {
        self.send(
            "set_local_config",
            request::set_local_config(config, application_id)?,
        )
        .await
    }

    /// Read the working tree status of a branch.
    ///
    /// # Errors
    ///
    /// Propagates transport errors unchanged.
    pub async fn get_git_status(&self, payload: &GitStatusPayload) -> Result<ApiResponse, Error> {
        self.send("get_git_status", request::git_status(payload)).await
    }
}
