//! Spans and log records reach the exporters through the same layer stack
//! the services install, independent of the console level.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use opentelemetry::logs::AnyValue;
use opentelemetry::{Key, Value};
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider};
use tower::ServiceExt;
use tracing_subscriber::layer::SubscriberExt;

use otel_test_apps::config::{TelemetryConfig, WorkloadConfig};
use otel_test_apps::observability::telemetry;
use otel_test_apps::test_app::{router, TestAppState};

fn has_body(body: Option<&AnyValue>, expected: &str) -> bool {
    matches!(body, Some(AnyValue::String(s)) if s.as_str() == expected)
}

#[tokio::test]
async fn test_root_request_is_exported() {
    let config = TelemetryConfig {
        // Console is nearly silent; export still runs at info.
        log_level: "error".to_string(),
        export_traces: true,
        export_logs: true,
        ..TelemetryConfig::default()
    };

    let spans = InMemorySpanExporter::default();
    let logs = InMemoryLogExporter::default();
    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(telemetry::resource(&config))
        .with_simple_exporter(spans.clone())
        .build();
    let logger_provider = SdkLoggerProvider::builder()
        .with_resource(telemetry::resource(&config))
        .with_simple_exporter(logs.clone())
        .build();

    let subscriber = tracing_subscriber::registry().with(telemetry::layers(
        &config,
        Some(&tracer_provider),
        Some(&logger_provider),
    ));
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = router(TestAppState::new(WorkloadConfig {
        root_delay_min_ms: 1,
        root_delay_max_ms: 5,
        ..WorkloadConfig::default()
    }));
    for uri in ["/", "/metrics"] {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    tracer_provider.force_flush().unwrap();
    logger_provider.force_flush().unwrap();

    let finished = spans.get_finished_spans().unwrap();
    assert_eq!(
        finished.iter().filter(|s| s.name == "process_request").count(),
        1,
        "{:?}",
        finished.iter().map(|s| s.name.to_string()).collect::<Vec<_>>()
    );

    let emitted = logs.get_emitted_logs().unwrap();
    let handling = emitted
        .iter()
        .find(|log| has_body(log.record.body(), "handling request"))
        .expect("handling request record exported");
    assert_eq!(
        handling.resource.get(&Key::from_static_str("service.name")),
        Some(Value::from("observability-test-app"))
    );
    assert!(emitted
        .iter()
        .any(|log| has_body(log.record.body(), "printing metrics")));
}
