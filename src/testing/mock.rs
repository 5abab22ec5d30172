//! Mock transport for testing.
//!
//! `MockTransport` records every request the client issues and answers with
//! configured envelopes instead of making network calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;

use crate::error::{ApiError, Error};
use crate::request::ApiRequest;
use crate::transport::Transport;
use crate::types::ApiResponse;

/// Record of an executed request.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// The request exactly as the client built it
    pub request: ApiRequest,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Envelope to return
    pub envelope: ApiResponse,
    /// Error to return instead of the envelope
    pub error: Option<ApiError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::with_data(Value::Null)
    }
}

impl MockResponse {
    /// A successful envelope carrying `data`.
    pub fn with_data(data: Value) -> Self {
        Self::with_envelope(ApiResponse::success(data))
    }

    /// Return `envelope` verbatim, including failed envelopes.
    pub fn with_envelope(envelope: ApiResponse) -> Self {
        Self {
            envelope,
            error: None,
            call_count: 0,
        }
    }

    /// Fail the call the way [`crate::HttpTransport`] does on an error status.
    pub fn with_error(status: u16, code: &str, message: &str) -> Self {
        Self {
            envelope: ApiResponse::failure(status, code, message),
            error: Some(ApiError::new(status, code, message)),
            call_count: 0,
        }
    }

    fn get_result(&mut self) -> Result<ApiResponse, Error> {
        self.call_count += 1;
        match &self.error {
            Some(error) => Err(Error::Api(error.clone())),
            None => Ok(self.envelope.clone()),
        }
    }
}

#[derive(Default)]
struct MockTransportState {
    calls: Vec<MockCall>,
    responses: HashMap<(Method, String), MockResponse>,
    fallback: MockResponse,
}

/// Transport double for tests.
///
/// Responses are configured per method and path (without query string).
/// Unconfigured requests get a successful envelope with `null` data.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use git_sync::testing::{MockResponse, MockTransport};
/// use git_sync::GitSyncClient;
/// use reqwest::Method;
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mock = Arc::new(MockTransport::new());
/// mock.configure(Method::GET, "/v1/git/branch/app-1", MockResponse::with_data(json!(["main"])));
///
/// let client = GitSyncClient::new(mock.clone());
/// let response = client.fetch_branches("app-1").await.unwrap();
///
/// assert_eq!(response.data, Some(json!(["main"])));
/// assert!(mock.was_called(&Method::GET, "/v1/git/branch/app-1"));
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockTransportState>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for `method path`.
    pub fn configure(&self, method: Method, path: &str, response: MockResponse) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .responses
            .insert((method, path.to_string()), response);
    }

    /// Configure the response for every request without a specific one.
    pub fn configure_fallback(&self, response: MockResponse) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fallback = response;
    }

    /// Check if `method path` was requested.
    #[must_use]
    pub fn was_called(&self, method: &Method, path: &str) -> bool {
        self.call_count(method, path) > 0
    }

    /// Number of times `method path` was requested.
    #[must_use]
    pub fn call_count(&self, method: &Method, path: &str) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .filter(|call| &call.request.method == method && call.request.path == path)
            .count()
    }

    /// Get recorded calls, optionally filtered by path.
    #[must_use]
    pub fn get_calls(&self, path: Option<&str>) -> Vec<MockCall> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match path {
            Some(p) => state.calls.iter().filter(|call| call.request.path == p).cloned().collect(),
            None => state.calls.clone(),
        }
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .last()
            .map(|call| call.request.clone())
    }

    /// Reset all recorded calls. Configured responses are kept.
    pub fn reset(&self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let state = &mut *guard;
        let key = (request.method.clone(), request.path.clone());
        state.calls.push(MockCall::new(request));

        match state.responses.get_mut(&key) {
            Some(response) => response.get_result(),
            None => state.fallback.get_result(),
        }
    }
}
