//! Testing utilities for the git sync client.
//!
//! Provides a mock transport for testing applications that use
//! [`crate::GitSyncClient`] without a running backend.

mod mock;

pub use mock::{MockCall, MockResponse, MockTransport};
