//! Data model types for the git sync client.

pub mod git;
pub mod profile;
pub mod response;

// Re-exports
pub use git::{
    CommitPayload, ConnectPayload, GitStatusPayload, MergeBranchPayload, MergeStatusPayload,
    PushPayload,
};
pub use profile::{GitConfig, GitProfile};
pub use response::{ApiResponse, ResponseError, ResponseMeta};
