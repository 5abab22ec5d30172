//! HTTP transport for the git sync client.
//!
//! [`Transport`] is the seam the client is built on: anything that can
//! execute an [`ApiRequest`] and hand back the response envelope. The
//! default [`HttpTransport`] runs requests through `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Error};
use crate::request::ApiRequest;
use crate::types::ApiResponse;

/// Executes requests built by the client.
///
/// Implementations own auth headers, timeouts and turning error statuses
/// into [`Error`]s. Only `execute` is required; [`GitSyncClient`] calls it
/// directly with fully built requests. `get`, `post` and `put` are
/// conveniences for callers issuing ad hoc requests through the same
/// transport.
///
/// [`GitSyncClient`]: crate::GitSyncClient
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the decoded envelope.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Error>;

    /// `GET path` with optional query parameters.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<ApiResponse, Error> {
        let request = params
            .iter()
            .fold(ApiRequest::new(Method::GET, path), |r, (k, v)| r.query(k, v));
        self.execute(request).await
    }

    /// `POST path` with an optional JSON body.
    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, Error> {
        let mut request = ApiRequest::new(Method::POST, path);
        request.body = body;
        self.execute(request).await
    }

    /// `PUT path` with a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, Error> {
        self.execute(ApiRequest::new(Method::PUT, path).body(body)).await
    }
}

/// `reqwest`-backed transport.
///
/// Handles:
/// - Joining the configured base URL with each request's path and query
/// - JSON bodies and optional bearer authentication
/// - Decoding the response envelope, and error statuses into [`ApiError`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server root the `/v1/git` paths are appended to
    /// * `timeout` - Per-request timeout
    /// * `auth_token` - Optional bearer token sent on every request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            client,
        })
    }

    /// Create a transport from a loaded [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        Self::new(&config.base_url, config.timeout, config.auth_token.clone())
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL a request is sent to.
    #[must_use]
    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }

    /// Parse an error response into an [`ApiError`].
    ///
    /// The body is read as the usual envelope when possible; otherwise the
    /// status alone is reported.
    async fn parse_error_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        let envelope = serde_json::from_str::<ApiResponse>(&text).ok();
        let reported = envelope.as_ref().and_then(ApiResponse::error);

        let code = reported
            .map(|e| e.code.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "UNKNOWN_ERROR".to_string());
        let message = reported
            .map(|e| e.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        ApiError::new(status, code, message)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.url_for(&request);
        debug!(method = %request.method, %url, "sending git sync request");

        let mut builder = self.client.request(request.method.clone(), &url);

        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.header("Content-Type", "application/json").json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error = Self::parse_error_response(response).await;
            warn!(
                method = %request.method,
                path = %request.path,
                %error,
                "git sync request failed"
            );
            return Err(Error::Api(error));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        serde_json::from_slice::<ApiResponse>(&body).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    fn create_test_transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(base_url, Duration::from_secs(30), None)
            .expect("transport creation should succeed")
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = create_test_transport("http://localhost:8080/");
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_url_for_request() {
        let transport = create_test_transport("https://git.example.com/api");
        let request = ApiRequest::new(Method::GET, "/v1/git/status/A").query("branchName", "dev/1");

        assert_eq!(
            transport.url_for(&request),
            "https://git.example.com/api/v1/git/status/A?branchName=dev%2F1"
        );
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            base_url: "http://git.internal:9000".to_string(),
            timeout: Duration::from_secs(5),
            auth_token: Some("token".to_string()),
        };

        let transport = HttpTransport::from_config(&config).expect("Should build");
        assert_eq!(transport.base_url(), "http://git.internal:9000");
        assert_eq!(transport.auth_token.as_deref(), Some("token"));
    }

    /// Records what the provided verbs hand to `execute`.
    struct RecordingTransport {
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
            self.seen.lock().unwrap_or_else(|e| e.into_inner()).push(request);
            Ok(ApiResponse::success(Value::Null))
        }
    }

    #[tokio::test]
    async fn test_provided_verbs_build_requests() {
        let transport = RecordingTransport {
            seen: Mutex::new(Vec::new()),
        };

        transport
            .get("/v1/git/status/A", &[("branchName", "main")])
            .await
            .expect("get should succeed");
        transport
            .post("/v1/git/push/A", None)
            .await
            .expect("post should succeed");
        transport
            .put("/v1/git/profile/A", json!({"authorName": "J"}))
            .await
            .expect("put should succeed");

        let seen = transport.seen.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(seen[0].path_and_query(), "/v1/git/status/A?branchName=main");
        assert_eq!(seen[1].method, Method::POST);
        assert!(seen[1].body.is_none());
        assert_eq!(seen[2].method, Method::PUT);
        assert_eq!(seen[2].body, Some(json!({"authorName": "J"})));
    }

    /// One-shot HTTP server answering with `status_line` and `body`.
    ///
    /// Resolves to the raw request text the server received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept should succeed");
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];

            // Headers, then as many body bytes as Content-Length announces.
            loop {
                let n = socket.read(&mut chunk).await.expect("read should succeed");
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .filter_map(|l| l.split_once(':'))
                        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write should succeed");
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn test_execute_sends_auth_and_json_headers() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"responseMeta":{"status":200,"success":true},"data":{"branchName":"x"}}"#,
        )
        .await;
        let transport =
            HttpTransport::new(&base_url, Duration::from_secs(5), Some("tok".to_string()))
                .expect("transport creation should succeed");

        let response = transport
            .execute(crate::request::create_branch("a b", "x"))
            .await
            .expect("execute should succeed");

        assert!(response.is_success());
        assert_eq!(response.data, Some(json!({"branchName": "x"})));

        let raw = server.await.expect("server task should finish");
        let lowered = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /v1/git/create-branch/a%20b HTTP/1.1\r\n"), "{raw}");
        assert!(lowered.contains("authorization: bearer tok\r\n"), "{raw}");
        assert!(lowered.contains("content-type: application/json\r\n"), "{raw}");
        assert!(raw.ends_with(r#"{"branchName":"x"}"#), "{raw}");
    }

    #[tokio::test]
    async fn test_execute_without_body_or_token() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"responseMeta":{"status":200,"success":true},"data":[]}"#,
        )
        .await;
        let transport = create_test_transport(&base_url);

        transport
            .execute(crate::request::fetch_branches("A"))
            .await
            .expect("execute should succeed");

        let raw = server.await.expect("server task should finish");
        let lowered = raw.to_ascii_lowercase();
        assert!(raw.starts_with("GET /v1/git/branch/A HTTP/1.1\r\n"), "{raw}");
        assert!(!lowered.contains("authorization:"), "{raw}");
        assert!(!lowered.contains("content-type:"), "{raw}");
    }

    #[tokio::test]
    async fn test_execute_maps_error_status_to_api_error() {
        let (base_url, _server) = serve_once(
            "HTTP/1.1 409 Conflict",
            r#"{"responseMeta":{"status":409,"success":false,"error":{"code":4031,"message":"conflict"}}}"#,
        )
        .await;
        let transport = create_test_transport(&base_url);

        let result = transport
            .execute(crate::request::create_branch("A", "main"))
            .await;

        match result {
            Err(Error::Api(error)) => {
                assert_eq!(error, ApiError::new(409, "4031", "conflict"));
            }
            other => panic!("Expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_error_status_without_envelope() {
        let (base_url, _server) = serve_once("HTTP/1.1 502 Bad Gateway", "upstream down").await;
        let transport = create_test_transport(&base_url);

        let result = transport
            .execute(crate::request::fetch_branches("A"))
            .await;

        match result {
            Err(Error::Api(error)) => {
                assert_eq!(error, ApiError::new(502, "UNKNOWN_ERROR", "HTTP 502"));
            }
            other => panic!("Expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_non_json_success_is_serialization_error() {
        let (base_url, _server) = serve_once("HTTP/1.1 200 OK", "<html>ok</html>").await;
        let transport = create_test_transport(&base_url);

        let result = transport
            .execute(crate::request::fetch_branches("A"))
            .await;

        assert!(matches!(result, Err(Error::Serialization(_))), "{result:?}");
    }

    #[tokio::test]
    async fn test_execute_connection_failure_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        drop(listener);

        let transport = create_test_transport(&base_url);
        let result = transport
            .execute(crate::request::fetch_branches("A"))
            .await;

        assert!(matches!(result, Err(Error::Http(_))), "{result:?}");
    }
}
