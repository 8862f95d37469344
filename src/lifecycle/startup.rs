//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file, environment, validation)
//! - Install telemetry before the first request can arrive
//! - Bind the listener and serve until a stop signal
//! - Flush buffered telemetry on the way out

use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, AppConfig, ConfigError, Service};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::load_app::{self, LoadAppState};
use crate::observability::{telemetry, Telemetry, TelemetryError};
use crate::test_app::{self, TestAppState};

/// Command-line arguments shared by both services.
#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Optional TOML file layered over the service defaults.
    #[arg(long, short, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Defaults for `service`, then the optional file, then the environment.
pub fn resolve_config(service: Service, args: &ServeArgs) -> Result<AppConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path, service)?,
        None => AppConfig::for_service(service),
    };
    config.apply_process_env()?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Router for `service` with freshly constructed state.
pub fn build_router(service: Service, config: &AppConfig) -> Router {
    match service {
        Service::TestApp => test_app::router(TestAppState::new(config.workload.clone())),
        Service::LoadApp => load_app::router(LoadAppState::new(config.workload.clone())),
    }
}

/// Run `service` until SIGINT/SIGTERM.
pub async fn serve(service: Service, args: ServeArgs) -> Result<(), StartupError> {
    let config = resolve_config(service, &args)?;
    let telemetry = telemetry::init(&config.telemetry)?;

    tracing::info!(
        service = service.default_name(),
        bind_address = %config.listener.bind_address,
        delay_mode = ?config.workload.delay_mode,
        request_timeout_secs = config.timeouts.request_secs,
        target_one = %config.targets.one,
        target_two = %config.targets.two,
        "Configuration loaded"
    );

    let address = config.listener.bind_address.clone();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => {
            tracing::error!(%address, error = %source, "failed to bind TCP listener, aborting");
            flush(telemetry).await;
            return Err(StartupError::Bind { address, source });
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        let subscribers = shutdown.trigger();
        tracing::info!(subscribers, "Shutdown broadcast to listeners");
    });

    let server = HttpServer::new(build_router(service, &config), &config);
    let result = server.run(listener, server_shutdown).await;

    flush(telemetry).await;
    tracing::info!("Shutdown complete");
    result.map_err(StartupError::Serve)
}

async fn flush(telemetry: Telemetry) {
    if let Err(error) = tokio::task::spawn_blocking(move || telemetry.shutdown()).await {
        tracing::warn!(%error, "telemetry flush task failed");
    }
}
