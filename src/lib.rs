//! Instrumented HTTP demo services for exercising an observability stack.
//!
//! # Architecture Overview
//!
//! ```text
//!                ┌───────────────────────────────────────────────┐
//!   Client ─────▶│ http::HttpServer (TraceLayer, TimeoutLayer)   │
//!                └───────────────────────┬───────────────────────┘
//!                                        │
//!                    ┌───────────────────┴───────────────────┐
//!                    ▼                                       ▼
//!             ┌─────────────┐                         ┌─────────────┐
//!             │  test_app   │ counter, span, log      │  load_app   │ io/cpu work,
//!             │ (Service A) │                         │ (Service B) │ random status
//!             └──────┬──────┘                         └──────┬──────┘
//!                    ▼                                       ▼
//!                ┌───────────────────────────────────────────────┐
//!                │ observability: /metrics scrape, OTLP traces   │──▶ collector
//!                │ and logs                                      │
//!                └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;

// Services
pub mod load_app;
pub mod test_app;
pub mod workload;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{AppConfig, Service};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
