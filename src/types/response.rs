//! The backend's generic response envelope.
//!
//! Every `/v1/git` endpoint answers with
//! `{"responseMeta": {"status", "success", "error"?}, "data"}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Error};

/// Status block of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// HTTP status as echoed by the backend
    #[serde(default)]
    pub status: u16,
    /// Whether the backend considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Failure details when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// Error details inside the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Error code; numeric codes are kept as their decimal string
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Generic response envelope returned by every operation.
///
/// The client hands it back untouched: checking `success` is up to the caller,
/// either directly or through [`ApiResponse::into_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = Value> {
    #[serde(default)]
    pub response_meta: ResponseMeta,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a successful envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            response_meta: ResponseMeta {
                status: 200,
                success: true,
                error: None,
            },
            data: Some(data),
        }
    }

    /// Build a failed envelope.
    pub fn failure(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            response_meta: ResponseMeta {
                status,
                success: false,
                error: Some(ResponseError {
                    code: code.into(),
                    message: message.into(),
                }),
            },
            data: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response_meta.success
    }

    /// Error details, if the backend reported any.
    #[must_use]
    pub fn error(&self) -> Option<&ResponseError> {
        self.response_meta.error.as_ref()
    }

    /// Convert the envelope's failure details into an [`ApiError`].
    ///
    /// Returns `None` for successful envelopes.
    #[must_use]
    pub fn api_error(&self) -> Option<ApiError> {
        if self.is_success() {
            return None;
        }
        let (code, message) = match self.error() {
            Some(e) if !e.code.is_empty() => (e.code.clone(), e.message.clone()),
            Some(e) => ("UNKNOWN_ERROR".to_string(), e.message.clone()),
            None => (
                "UNKNOWN_ERROR".to_string(),
                format!("HTTP {}", self.response_meta.status),
            ),
        };
        Some(ApiError::new(self.response_meta.status, code, message))
    }

    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// `Error::Api` when the envelope reports failure, `Error::MissingData`
    /// when it succeeded without a payload.
    pub fn into_data(self) -> Result<T, Error> {
        if let Some(error) = self.api_error() {
            return Err(Error::Api(error));
        }
        self.data.ok_or(Error::MissingData)
    }
}

impl ApiResponse<Value> {
    /// Re-type the JSON payload.
    ///
    /// # Errors
    ///
    /// Same as [`ApiResponse::into_data`], plus `Error::Serialization` when
    /// the payload does not match `U`.
    pub fn decode_data<U: DeserializeOwned>(self) -> Result<U, Error> {
        let data = self.into_data()?;
        serde_json::from_value(data).map_err(Error::from)
    }
}
