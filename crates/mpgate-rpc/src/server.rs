//! gRPC server bootstrap with health reporting and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;

use mpgate_core::config::server::ServerConfig;
use mpgate_core::{GatewayError, GatewayResult};
use mpgate_proxy::MpProxy;

use crate::pb::mp_gate_server::MpGateServer;
use crate::service::MpGateService;

/// Bind the listener and serve until a shutdown signal arrives.
///
/// The health service reports SERVING once the listener is up and flips
/// to NOT_SERVING when the shutdown signal is received, before the
/// graceful stop drains in-flight RPCs.
pub async fn serve(config: &ServerConfig, proxy: Arc<MpProxy>) -> GatewayResult<()> {
    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .map_err(|e| GatewayError::configuration(format!("invalid listen address: {e}")))?;

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<MpGateServer<MpGateService>>()
        .await;

    let mut shutdown_reporter = health_reporter.clone();
    let shutdown = async move {
        shutdown_signal().await;
        shutdown_reporter
            .set_not_serving::<MpGateServer<MpGateService>>()
            .await;
        tracing::info!("shutdown signal received, draining in-flight RPCs");
    };

    tracing::info!(%addr, "starting gRPC server");

    Server::builder()
        .add_service(health_service)
        .add_service(MpGateServer::new(MpGateService::new(proxy)))
        .serve_with_shutdown(addr, shutdown)
        .await
        .map_err(|e| GatewayError::internal(format!("gRPC server error: {e}")))?;

    tracing::info!("server shutdown completed");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
