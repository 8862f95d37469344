//! Telemetry bootstrap: OTLP traces and logs.
//!
//! # Responsibilities
//! - Describe the process with a `service.name` resource
//! - Batch completed spans to the collector over plaintext gRPC
//! - Batch log records to the same collector, bridged from `tracing`
//! - Install the process-wide subscriber exactly once
//!
//! # Design Decisions
//! - Exporters connect lazily; an unreachable collector never delays or
//!   fails startup, and batch processors drop what they cannot deliver
//! - A signal whose exporter cannot even be built is skipped with a warning
//! - Console, span export and log export each carry their own filter, so a
//!   quiet console never silences what reaches the collector

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

use crate::config::{normalize_otlp_endpoint, TelemetryConfig};
use crate::observability::logging;

/// Instrumentation scope of spans produced by this crate.
pub const INSTRUMENTATION_SCOPE: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("global subscriber already installed: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Handle to the installed providers. Flush it on the way out.
#[derive(Default)]
pub struct Telemetry {
    tracer_provider: Option<SdkTracerProvider>,
    logger_provider: Option<SdkLoggerProvider>,
}

impl Telemetry {
    pub fn exports_traces(&self) -> bool {
        self.tracer_provider.is_some()
    }

    pub fn exports_logs(&self) -> bool {
        self.logger_provider.is_some()
    }

    /// Flush buffered spans and records, then stop the batch processors.
    ///
    /// Blocks until the exporters answer or time out; call it off the
    /// async worker threads.
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(error) = provider.shutdown() {
                tracing::warn!(%error, "tracer provider shutdown failed");
            }
        }
        if let Some(provider) = self.logger_provider {
            // Logged to stderr: the bridge is gone once this provider stops.
            if let Err(error) = provider.shutdown() {
                eprintln!("logger provider shutdown failed: {error}");
            }
        }
    }
}

/// Build the resource describing this process.
pub fn resource(config: &TelemetryConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Console output plus whichever OTel bridges have a provider.
pub fn layers<S>(
    config: &TelemetryConfig,
    tracer_provider: Option<&SdkTracerProvider>,
    logger_provider: Option<&SdkLoggerProvider>,
) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let console = tracing_subscriber::fmt::layer()
        .with_filter(logging::env_filter(&config.log_level));

    let spans = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(INSTRUMENTATION_SCOPE))
            .with_filter(logging::span_filter(&config.export_level))
    });

    let logs = logger_provider.map(|provider| {
        OpenTelemetryTracingBridge::new(provider)
            .with_filter(logging::export_filter(&config.export_level))
    });

    console.and_then(spans).and_then(logs)
}

/// Install the global subscriber, wiring OTLP export as configured.
///
/// Must be called from within a Tokio runtime: the gRPC channels spawn
/// their connection workers on it.
pub fn init(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    let resource = resource(config);
    let mut skipped = Vec::new();

    let endpoint = normalize_otlp_endpoint(&config.otlp_endpoint);

    let tracer_provider = if config.export_traces {
        match SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.clone())
            .build()
        {
            Ok(exporter) => Some(
                SdkTracerProvider::builder()
                    .with_resource(resource.clone())
                    .with_batch_exporter(exporter)
                    .build(),
            ),
            Err(error) => {
                skipped.push(("traces", error.to_string()));
                None
            }
        }
    } else {
        None
    };

    let logger_provider = if config.export_logs {
        match LogExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.clone())
            .build()
        {
            Ok(exporter) => Some(
                SdkLoggerProvider::builder()
                    .with_resource(resource)
                    .with_batch_exporter(exporter)
                    .build(),
            ),
            Err(error) => {
                skipped.push(("logs", error.to_string()));
                None
            }
        }
    } else {
        None
    };

    global::set_text_map_propagator(TraceContextPropagator::new());

    if let Some(provider) = &tracer_provider {
        global::set_tracer_provider(provider.clone());
    }

    tracing_subscriber::registry()
        .with(layers(
            config,
            tracer_provider.as_ref(),
            logger_provider.as_ref(),
        ))
        .try_init()?;

    for (signal, error) in skipped {
        tracing::warn!(
            signal,
            %endpoint,
            %error,
            "OTLP exporter unavailable, signal will not be exported"
        );
    }

    tracing::info!(
        service_name = %config.service_name,
        %endpoint,
        traces = tracer_provider.is_some(),
        logs = logger_provider.is_some(),
        "Telemetry initialized"
    );

    Ok(Telemetry {
        tracer_provider,
        logger_provider,
    })
}
