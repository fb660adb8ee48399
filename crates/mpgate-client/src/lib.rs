//! # mpgate-client
//!
//! The shared plumbing every platform operation is built from:
//!
//! - [`envelope`]: the `{errcode, errmsg}` error envelope, generic
//!   envelope+payload decoding, and request-body building
//! - [`transport`]: the shared [`HttpClient`](transport::HttpClient)
//!   wrapper over `reqwest` with a fixed global timeout
//! - [`paths`]: the upstream path constant for each operation
//!
//! A handler composes these into exactly one outbound HTTP call and
//! checks the decoded envelope before trusting the payload.

pub mod envelope;
pub mod paths;
pub mod transport;

pub use envelope::{Envelope, ErrorEnvelope, build_request_body};
pub use transport::HttpClient;
