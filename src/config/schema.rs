//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure shared by both
//! demo services. All types derive Serde traits for deserialization from
//! config files; every section has defaults so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Default collector address inside the test cluster.
pub const DEFAULT_OTLP_ENDPOINT: &str =
    "http://opentelemetry-collector.opentelemetry-operator-system.svc.cluster.local:4317";

/// Which of the two demo services a process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Telemetry-emitting app: counter, logs and spans.
    TestApp,
    /// Load-generating app: simulated I/O, CPU and status variability.
    LoadApp,
}

impl Service {
    /// Value reported as the `service.name` resource attribute.
    pub fn default_name(self) -> &'static str {
        match self {
            Service::TestApp => "observability-test-app",
            Service::LoadApp => "observability-load-app",
        }
    }
}

/// Root configuration for a demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Log, trace and export settings.
    pub telemetry: TelemetryConfig,

    /// Simulated work performed by the handlers.
    pub workload: WorkloadConfig,

    /// Peer services. Declared for future inter-service calls.
    pub targets: TargetsConfig,
}

impl AppConfig {
    /// Defaults for the given service.
    ///
    /// The test app exports traces and logs out of the box; the load app
    /// only writes plain log lines unless export is switched on.
    pub fn for_service(service: Service) -> Self {
        let exporting = service == Service::TestApp;
        Self {
            telemetry: TelemetryConfig {
                service_name: service.default_name().to_string(),
                export_traces: exporting,
                export_logs: exporting,
                ..TelemetryConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute.
    pub service_name: String,

    /// OTLP/gRPC collector endpoint for traces and logs.
    pub otlp_endpoint: String,

    /// Export spans over OTLP.
    pub export_traces: bool,

    /// Export log records over OTLP.
    pub export_logs: bool,

    /// Console log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Lowest level of spans and log records sent to the collector.
    /// Independent of the console level.
    pub export_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: Service::TestApp.default_name().to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            export_traces: false,
            export_logs: false,
            log_level: "info".to_string(),
            export_level: "info".to_string(),
        }
    }
}

/// How simulated delays occupy the handling path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DelayMode {
    /// Cooperative sleep; the runtime keeps serving other requests.
    #[default]
    Yield,
    /// Thread-blocking sleep, isolated on the blocking pool.
    Blocking,
}

/// Simulated work settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub delay_mode: DelayMode,

    /// Lower bound of the random delay inside the `process_request` span.
    pub root_delay_min_ms: u64,

    /// Upper bound of the random delay inside the `process_request` span.
    pub root_delay_max_ms: u64,

    /// Fixed delay of the simulated I/O task.
    pub io_delay_ms: u64,

    /// Iterations of the simulated CPU task.
    pub cpu_iterations: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            delay_mode: DelayMode::Yield,
            root_delay_min_ms: 100,
            root_delay_max_ms: 500,
            io_delay_ms: 1000,
            cpu_iterations: 1000,
        }
    }
}

/// Peer service addresses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetsConfig {
    pub one: String,
    pub two: String,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            one: "localhost:8000".to_string(),
            two: "localhost:8000".to_string(),
        }
    }
}
