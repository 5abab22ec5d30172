//! Git sync client for Rust
//!
//! Typed async binding for the `/v1/git` REST service: commit, push, merge,
//! branch management and git profile configuration. The git work itself
//! happens on the backend; this crate only shapes requests and returns the
//! backend's response envelope.
//!
//! # Quick Start
//!
//! ```rust
//! use git_sync::request;
//! use git_sync::CommitPayload;
//!
//! let request = request::commit(&CommitPayload {
//!     application_id: "app-1".to_string(),
//!     commit_message: "Update queries".to_string(),
//!     do_push: true,
//!     branch: "main".to_string(),
//! });
//!
//! assert_eq!(request.method, reqwest::Method::POST);
//! assert_eq!(request.path_and_query(), "/v1/git/commit/app-1?branchName=main");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::GitSyncClient;
pub use config::ClientConfig;
pub use error::{ApiError, Error};
pub use request::{ApiRequest, BASE_PATH};
pub use transport::{HttpTransport, Transport};
pub use types::{
    ApiResponse, CommitPayload, ConnectPayload, GitConfig, GitProfile, GitStatusPayload,
    MergeBranchPayload, MergeStatusPayload, PushPayload, ResponseError, ResponseMeta,
};
