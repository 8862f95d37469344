//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! service defaults (AppConfig::for_service)
//!     → loader.rs (optional TOML file merged on top)
//!     → loader.rs (OTEL_EXPORTER_OTLP_ENDPOINT, EXPOSE_PORT, TARGET_*_SVC)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, normalize_otlp_endpoint, ConfigError};
pub use schema::{
    AppConfig, DelayMode, ListenerConfig, Service, TargetsConfig, TelemetryConfig,
    TimeoutConfig, WorkloadConfig,
};
pub use validation::{validate_config, ValidationError};
