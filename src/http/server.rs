//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap a service router with the shared middleware stack
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;

/// HTTP server for one demo service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server for `router` with the middleware `config` asks for.
    pub fn new(router: Router, config: &AppConfig) -> Self {
        Self {
            router: Self::build_router(router, config),
        }
    }

    #[allow(deprecated)]
    fn build_router(router: Router, config: &AppConfig) -> Router {
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
