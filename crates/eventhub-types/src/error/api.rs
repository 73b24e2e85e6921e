//! Normalized API errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used when a request was sent but nothing came back.
const NO_RESPONSE_MESSAGE: &str = "No response from server";

/// The single error shape every failed gateway call resolves to.
///
/// Whatever went wrong (a rejection from the server, a transport failure,
/// or a request that could not be built) the caller sees exactly one of
/// these and can read it uniformly through [`message`](Self::message),
/// [`status`](Self::status) and [`data`](Self::data).
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    ServerRejected {
        /// HTTP status code returned by the server
        status: u16,
        /// Server-provided message, or a generic one when absent
        message: String,
        /// Raw response payload, if any
        data: Option<Value>,
    },

    /// The request was sent but no response arrived (network, timeout, cancel)
    #[error("{message}")]
    NoResponse {
        /// Description of the transport failure
        message: String,
    },

    /// The request could not be constructed
    #[error("Request setup failed: {message}")]
    RequestSetupFailed {
        /// Description of what could not be built
        message: String,
    },

    /// A 2xx response whose body did not match the expected shape
    #[error("Invalid response (HTTP {status}): {message}")]
    InvalidResponse {
        /// HTTP status code of the undecodable response
        status: u16,
        /// Decoder error description
        message: String,
    },
}

impl ApiError {
    /// Transport failure with the default message.
    pub fn no_response() -> Self {
        Self::NoResponse { message: NO_RESPONSE_MESSAGE.to_string() }
    }

    /// Request construction failure.
    pub fn setup(message: impl Into<String>) -> Self {
        Self::RequestSetupFailed { message: message.into() }
    }

    /// HTTP status, or `None` when no response was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerRejected { status, .. } | Self::InvalidResponse { status, .. } => {
                Some(*status)
            },
            Self::NoResponse { .. } | Self::RequestSetupFailed { .. } => None,
        }
    }

    /// Human-readable message without the status decoration.
    pub fn message(&self) -> &str {
        match self {
            Self::ServerRejected { message, .. }
            | Self::NoResponse { message }
            | Self::RequestSetupFailed { message }
            | Self::InvalidResponse { message, .. } => message,
        }
    }

    /// Raw server payload attached to a rejection.
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::ServerRejected { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// True when the server rejected the credential (HTTP 401).
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ServerRejected { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_none_without_response() {
        assert_eq!(ApiError::no_response().status(), None);
        assert_eq!(ApiError::setup("bad header").status(), None);
        assert_eq!(ApiError::no_response().message(), "No response from server");
    }

    #[test]
    fn test_rejection_accessors() {
        let err = ApiError::ServerRejected {
            status: 401,
            message: "Token expired".to_string(),
            data: Some(serde_json::json!({ "message": "Token expired" })),
        };

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Token expired");
        assert!(err.is_unauthorized());
        assert_eq!(
            err.data().and_then(|d| d.get("message")).and_then(Value::as_str),
            Some("Token expired")
        );
        assert_eq!(err.to_string(), "Token expired (HTTP 401)");
    }

    #[test]
    fn test_invalid_response_keeps_status() {
        let err = ApiError::InvalidResponse { status: 200, message: "missing field".to_string() };
        assert_eq!(err.status(), Some(200));
        assert!(err.data().is_none());
        assert!(!err.is_unauthorized());
    }
}
