use std::{future::Future, net::SocketAddr};

use axum::Router;
use forge_core::{
    application::ApplicationError,
    domain::{ServiceEndpoint, hello::RESPONSE_BODY},
    error::ForgeResult,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Every method on every path answers `200 Hello World!`.
pub fn hello_router() -> Router {
    Router::new()
        .fallback(hello)
        .layer(TraceLayer::new_for_http())
}

async fn hello() -> &'static str {
    RESPONSE_BODY
}

/// A bound listener, ready to serve.
pub struct HelloServer {
    listener: TcpListener,
    address: String,
}

impl HelloServer {
    pub async fn bind(endpoint: &ServiceEndpoint) -> ForgeResult<Self> {
        let address = endpoint.to_string();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| listener_failed(&address, e))?;
        Ok(Self { listener, address })
    }

    pub fn local_addr(&self) -> ForgeResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| listener_failed(&self.address, e))
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> ForgeResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self { listener, address } = self;
        info!("Hello server listening on {address}");

        axum::serve(listener, hello_router().into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| listener_failed(&address, e))?;

        info!("Hello server stopped");
        Ok(())
    }
}

fn listener_failed(address: &str, e: std::io::Error) -> forge_core::error::ForgeError {
    ApplicationError::ListenerFailed {
        address: address.to_string(),
        reason: e.to_string(),
    }
    .into()
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
