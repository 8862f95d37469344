//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers produce:
//!     → tracing events (log lines)   → console + OTLP logs (telemetry.rs)
//!     → tracing spans                → OTLP traces (telemetry.rs)
//!     → counter increments           → metrics.rs → GET /metrics scrape
//! ```
//!
//! # Design Decisions
//! - `tracing` is the single logging facility; OTLP log export is a layer
//! - Metrics are cheap (atomic increments) and scraped, never pushed
//! - Telemetry is fire-and-forget: export failures never reach a caller

pub mod logging;
pub mod metrics;
pub mod telemetry;

pub use metrics::AppMetrics;
pub use telemetry::{Telemetry, TelemetryError};
