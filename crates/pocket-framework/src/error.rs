//! # Framework Errors
//!
//! Every failure an API tier or repository can report is an [`ApiError`].
//! The variants fall into four families:
//!
//! - **Transport**: the request could not be sent, the server answered with a
//!   non-success status, or the payload could not be (de)serialized.
//! - **Capability**: an operation was invoked on an [`AppApi`](crate::AppApi)
//!   whose access level does not include it.
//! - **Mapping**: the repository's mapper rejected an otherwise successful result.
//! - **Dispatch**: the dispatcher dropped the task before it finished.
//!
//! `ApiError` is `Clone + PartialEq` so a failure can be handed to a callback
//! verbatim and compared in tests.

use crate::access::{AccessLevel, Operation};

/// Result alias used across the framework.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by the API tiers and repositories.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The requested resource does not exist.
    #[error("Not found: {path}/{id}")]
    NotFound { path: String, id: String },

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The base URL or route could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A DTO violated the data transfer object shape invariant.
    #[error("Invalid DTO shape for '{id}': {reason}")]
    InvalidShape { id: String, reason: String },

    /// The operation is not part of the API's access level.
    #[error("{operation} is not implemented at access level {level}")]
    Unsupported {
        operation: Operation,
        level: AccessLevel,
    },

    /// The repository mapper failed on a successful result.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// The dispatched task was dropped before it produced a result.
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl ApiError {
    /// True for failures that originate from talking to the remote service.
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            ApiError::Unsupported { .. } | ApiError::Mapping(_) | ApiError::Dispatch(_)
        )
    }

    pub(crate) fn unsupported(operation: Operation, level: AccessLevel) -> Self {
        ApiError::Unsupported { operation, level }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::InvalidUrl(e.to_string())
    }
}
