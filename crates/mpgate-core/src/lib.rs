//! # mpgate-core
//!
//! Core crate for mpgate. Contains configuration schemas, the unified
//! error type, and the result alias used by every other crate.
//!
//! This crate has **no** internal dependencies on other mpgate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, GatewayError};
pub use result::GatewayResult;
