//! Convenience result type alias for mpgate.

use crate::error::GatewayError;

/// A specialized `Result` type for mpgate operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, GatewayError>` explicitly.
pub type GatewayResult<T> = Result<T, GatewayError>;
