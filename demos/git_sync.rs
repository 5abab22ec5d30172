//! Git sync client: branch, commit and push workflow
//!
//! This example demonstrates a typical editor save flow:
//! 1. Read the git status of a branch
//! 2. Create a feature branch
//! 3. Commit without pushing, then push separately
//! 4. Check whether the feature branch can merge back
//!
//! ```bash
//! RUST_LOG=git_sync=debug GIT_SYNC_BASE_URL=http://localhost:8080 \
//! cargo run --example git_sync -- <application-id>
//! ```

use std::env;

use git_sync::{
    CommitPayload, Error, GitStatusPayload, GitSyncClient, MergeStatusPayload, PushPayload,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "git_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Git Sync Client Example ===\n");

    let application_id = env::args()
        .nth(1)
        .unwrap_or_else(|| "example-application".to_string());
    let base_branch = env::var("GIT_SYNC_BASE_BRANCH").unwrap_or_else(|_| "master".to_string());
    let feature_branch = format!("feature/example-{}", std::process::id());

    let client = GitSyncClient::from_env()?;

    // Step 1: Status of the base branch
    println!("1. Reading status of '{base_branch}'...");
    let status = client
        .get_git_status(&GitStatusPayload {
            application_id: application_id.clone(),
            branch: base_branch.clone(),
        })
        .await?;
    println!("   Success: {}", status.is_success());
    if let Some(data) = &status.data {
        println!("   Status: {data}");
    }

    // Step 2: Create a feature branch
    println!("\n2. Creating branch '{feature_branch}'...");
    let created = client
        .create_new_branch(&application_id, &feature_branch)
        .await?;
    if let Some(error) = created.error() {
        println!("   Backend refused: [{}] {}", error.code, error.message);
        return Ok(());
    }

    // Step 3: Commit, then push once the commit has landed
    println!("\n3. Committing on '{feature_branch}'...");
    let commit = client
        .commit(&CommitPayload {
            application_id: application_id.clone(),
            commit_message: "Example commit from the git sync client".to_string(),
            do_push: false,
            branch: feature_branch.clone(),
        })
        .await?;
    println!("   Success: {}", commit.is_success());

    println!("\n4. Pushing '{feature_branch}'...");
    match client
        .push(&PushPayload {
            application_id: application_id.clone(),
            branch: feature_branch.clone(),
        })
        .await
    {
        Ok(push) => println!("   Success: {}", push.is_success()),
        Err(Error::Api(error)) => println!("   Push rejected: {error}"),
        Err(e) => return Err(e.into()),
    }

    // Step 5: Can the branch merge back?
    println!("\n5. Checking merge status into '{base_branch}'...");
    let merge_status = client
        .get_merge_status(&MergeStatusPayload {
            application_id: application_id.clone(),
            source_branch: feature_branch.clone(),
            destination_branch: base_branch.clone(),
        })
        .await?;
    if let Some(data) = &merge_status.data {
        println!("   Merge status: {data}");
    }

    println!("\n=== Workflow Complete ===");
    Ok(())
}
