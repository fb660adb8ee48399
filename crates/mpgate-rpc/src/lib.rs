//! # mpgate-rpc
//!
//! The gRPC surface of mpgate: generated protobuf types, the service
//! facade adapting RPC wire types to the proxy handler signatures, and
//! the server bootstrap with the standard health service.
//!
//! The facade performs no business logic; it is pure structural
//! adaptation between the wire schema and [`mpgate_proxy::MpProxy`].

/// Generated protobuf types for `mpgate.v1`.
pub mod pb {
    tonic::include_proto!("mpgate.v1");
}

pub mod convert;
pub mod server;
pub mod service;

pub use service::MpGateService;
