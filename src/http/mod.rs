//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, graceful shutdown)
//!     → TraceLayer (one server span per request)
//!     → TimeoutLayer
//!     → service router (test_app or load_app handlers)
//! ```

pub mod server;

pub use server::HttpServer;
