//! End-to-end tests for the telemetry-emitting test app.

use otel_test_apps::config::WorkloadConfig;
use otel_test_apps::observability::metrics::{sample_value, CONTENT_TYPE, REQUESTS_TOTAL};
use otel_test_apps::test_app::{router, TestAppState};
use otel_test_apps::Service;

mod common;

fn quick_workload() -> WorkloadConfig {
    WorkloadConfig {
        root_delay_min_ms: 1,
        root_delay_max_ms: 5,
        ..WorkloadConfig::default()
    }
}

#[tokio::test]
async fn test_root_greeting() {
    let svc = common::start(Service::TestApp, router(TestAppState::new(quick_workload()))).await;

    let res = svc.get("/").await;
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Hello from observability test app");
}

#[tokio::test]
async fn test_metrics_exposition() {
    let svc = common::start(Service::TestApp, router(TestAppState::new(quick_workload()))).await;

    let res = svc.get("/metrics").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], CONTENT_TYPE);

    let text = res.text().await.unwrap();
    for line in text.lines().filter(|l| !l.is_empty()) {
        if line.starts_with('#') {
            assert!(line.starts_with("# HELP ") || line.starts_with("# TYPE "), "{line}");
        } else {
            let (name, value) = line.rsplit_once(' ').unwrap();
            assert!(!name.is_empty());
            assert!(value.parse::<f64>().is_ok(), "{line}");
        }
    }
    assert!(text.lines().any(|l| l.starts_with("test_app_requests_total ")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_counter_exact_under_concurrency() {
    let svc = common::start(Service::TestApp, router(TestAppState::new(quick_workload()))).await;

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let client = svc.client.clone();
        let url = svc.url("/");
        tasks.push(tokio::spawn(async move {
            for _ in 0..5 {
                let res = client.get(&url).send().await.unwrap();
                assert_eq!(res.status(), 200);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let text = svc.get("/metrics").await.text().await.unwrap();
    assert_eq!(sample_value(&text, REQUESTS_TOTAL), Some(50.0));
}

#[tokio::test]
async fn test_counter_is_monotonic() {
    let svc = common::start(Service::TestApp, router(TestAppState::new(quick_workload()))).await;

    let mut last = 0.0;
    for _ in 0..5 {
        svc.get("/").await;
        let text = svc.get("/metrics").await.text().await.unwrap();
        let now = sample_value(&text, REQUESTS_TOTAL).unwrap();
        assert_eq!(now, last + 1.0);
        last = now;
    }
}
