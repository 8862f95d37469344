//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use otel_test_apps::{AppConfig, HttpServer, Service, Shutdown};
use tokio::net::TcpListener;

/// A service listening on an ephemeral local port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("service unreachable")
    }
}

impl Drop for RunningService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Serve `router` with the production middleware stack.
pub async fn start(service: Service, router: Router) -> RunningService {
    let config = AppConfig::for_service(service);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(router, &config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    RunningService {
        addr,
        client,
        shutdown,
    }
}
