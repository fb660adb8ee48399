//! Unified error type for mpgate.
//!
//! All crates map their internal failures into [`GatewayError`] for
//! consistent propagation through the ? operator. The upstream platform
//! reports failures as a numeric code plus a message; transport-level and
//! decoding failures are normalized into the same shape with code 500.

use std::fmt;
use thiserror::Error;

/// Code reported for failures that never produced an upstream error code.
pub const CODE_INTERNAL: i64 = 500;

/// Top-level error kind categorization used across the entire gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The HTTP call failed before a response body was obtained.
    Transport,
    /// The response body did not match the expected shape.
    Decode,
    /// A well-formed response carried a non-zero error code.
    Upstream,
    /// A request payload could not be serialized.
    Serialization,
    /// A QR-code scene was missing or not of a supported type.
    Scene,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Decode => write!(f, "DECODE"),
            Self::Upstream => write!(f, "UPSTREAM"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Scene => write!(f, "SCENE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout mpgate.
///
/// Carries the numeric code surfaced on the RPC boundary: the upstream
/// `errcode` for [`ErrorKind::Upstream`], [`CODE_INTERNAL`] for everything
/// else.
#[derive(Debug, Error)]
#[error("{kind} ({code}): {message}")]
pub struct GatewayError {
    /// The category of error.
    pub kind: ErrorKind,
    /// Numeric code reported to callers.
    pub code: i64,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: CODE_INTERNAL,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new gateway error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: CODE_INTERNAL,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::Transport, message, source)
    }

    /// Create a decode error.
    pub fn decode(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::Decode, message, source)
    }

    /// Create an upstream error from a non-zero error envelope.
    pub fn upstream(code: i64, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Upstream,
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::Serialization, message, source)
    }

    /// Create an unsupported-scene error.
    pub fn scene(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Scene, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON serialization error: {err}"), err)
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_keeps_code() {
        let err = GatewayError::upstream(40013, "invalid appid");
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.code, 40013);
        assert_eq!(err.to_string(), "UPSTREAM (40013): invalid appid");
    }

    #[test]
    fn test_non_upstream_errors_report_internal_code() {
        let err = GatewayError::scene("scene not supported");
        assert_eq!(err.code, CODE_INTERNAL);
        assert_eq!(err.kind, ErrorKind::Scene);
    }
}
