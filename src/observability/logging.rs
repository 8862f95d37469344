//! Structured logging.
//!
//! Every log call in this crate is a `tracing` event. This module builds the
//! pieces of the subscriber that print those events locally; the OTLP side
//! lives in [`super::telemetry`].

use tracing_subscriber::EnvFilter;

/// Crates whose own logs must never be fed back into the OTLP log pipeline.
pub const EXPORT_PIPELINE_CRATES: [&str; 6] =
    ["hyper", "h2", "tonic", "tower", "reqwest", "opentelemetry"];

/// Console filter: `RUST_LOG` if set, else `<level>,tower_http=debug`.
///
/// Attached to the fmt layer only; it never decides what gets exported.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=debug")))
}

/// Filter for the OTLP log bridge.
pub fn export_filter(export_level: &str) -> EnvFilter {
    EnvFilter::new(export_directives(export_level))
}

/// Filter for the span exporter. Keeps the per-request server spans that
/// `tower_http` opens at debug level.
pub fn span_filter(export_level: &str) -> EnvFilter {
    EnvFilter::new(format!("{},tower_http=debug", export_directives(export_level)))
}

fn export_directives(log_level: &str) -> String {
    EXPORT_PIPELINE_CRATES
        .iter()
        .fold(log_level.to_string(), |acc, krate| format!("{acc},{krate}=off"))
}
