//! Service A: the telemetry-emitting test app.

use clap::Parser;

use otel_test_apps::lifecycle::{serve, ServeArgs, StartupError};
use otel_test_apps::Service;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    serve(Service::TestApp, ServeArgs::parse()).await
}
