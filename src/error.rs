/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error handling for the tasks client
//!
//! Every fallible operation returns [`AppError`]. Backend error payloads are
//! reduced to a single human-readable message by [`extract_error_message`],
//! which is what [`AppError::user_message`] hands to the UI layer.

use crate::constants::{
    FORBIDDEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE, INVALID_INPUT_MESSAGE, NETWORK_ERROR_MESSAGE,
    SERVER_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Main error type of the library
#[derive(Debug)]
pub enum AppError {
    /// The request never got a response (DNS, connection refused, timeout...)
    Network(reqwest::Error),
    /// The backend answered with a non-success status
    Api {
        /// HTTP status returned by the backend
        status: StatusCode,
        /// Normalized message extracted from the payload
        message: String,
    },
    /// An authentication endpoint rejected the submitted credentials
    InvalidCredentials,
    /// A request was still unauthorized after its single post-refresh retry
    Unauthorized(String),
    /// The access token could not be renewed; the session has been cleared
    RefreshFailed(String),
    /// A response body did not match the expected shape
    Deserialization(String),
    /// JSON (de)serialization failure outside of a response body
    Json(serde_json::Error),
    /// Filesystem failure
    Io(std::io::Error),
    /// Caller supplied invalid arguments
    InvalidInput(String),
    /// The token store could not satisfy the operation
    Storage(String),
}

impl AppError {
    /// Single human-readable message suitable for display to end users
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            AppError::Api { message, .. } => message.clone(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::Unauthorized(message)
            | AppError::RefreshFailed(message)
            | AppError::InvalidInput(message) => message.clone(),
            AppError::Deserialization(_)
            | AppError::Json(_)
            | AppError::Io(_)
            | AppError::Storage(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status associated with the error, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::InvalidCredentials | AppError::Unauthorized(_) => {
                Some(StatusCode::UNAUTHORIZED)
            }
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the error means the user has to authenticate again
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials | AppError::Unauthorized(_) | AppError::RefreshFailed(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Api { status, message } => write!(f, "api error {status}: {message}"),
            AppError::InvalidCredentials => write!(f, "invalid credentials"),
            AppError::Unauthorized(message) => write!(f, "unauthorized: {message}"),
            AppError::RefreshFailed(message) => write!(f, "token refresh failed: {message}"),
            AppError::Deserialization(message) => write!(f, "deserialization error: {message}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            AppError::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Deserialization(e.to_string())
        } else {
            AppError::Network(e)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

/// Reduces a backend error payload to one human-readable message
///
/// The payload is searched in this order: `detail`, `error`, `message`, the
/// first entry of `non_field_errors`, then the first field error in document
/// order. When nothing usable is found the message falls back on the status:
/// 400 invalid input, 401/404 invalid credentials, 403 forbidden, 5xx server
/// error, anything else a generic message.
///
/// # Arguments
/// * `status` - Status code of the failed response
/// * `body` - Raw response body, JSON or not
#[must_use]
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| message_from_payload(&payload))
        .unwrap_or_else(|| fallback_message(status).to_string())
}

fn message_from_payload(payload: &Value) -> Option<String> {
    let Some(object) = payload.as_object() else {
        return first_text(payload);
    };

    ["detail", "error", "message", "non_field_errors"]
        .iter()
        .find_map(|key| object.get(*key).and_then(first_text))
        .or_else(|| object.values().find_map(first_text))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        Value::Object(fields) => fields.values().find_map(first_text),
        _ => None,
    }
}

fn fallback_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => INVALID_INPUT_MESSAGE,
        StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => INVALID_CREDENTIALS_MESSAGE,
        StatusCode::FORBIDDEN => FORBIDDEN_MESSAGE,
        s if s.is_server_error() => SERVER_ERROR_MESSAGE,
        _ => UNEXPECTED_ERROR_MESSAGE,
    }
}
