//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::schema::{AppConfig, Service};
use crate::config::validation::{validate_config, ValidationError};

/// Collector endpoint for both traces and logs.
pub const ENV_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
/// Port the HTTP listener binds to.
pub const ENV_EXPOSE_PORT: &str = "EXPOSE_PORT";
pub const ENV_TARGET_ONE: &str = "TARGET_ONE_SVC";
pub const ENV_TARGET_TWO: &str = "TARGET_TWO_SVC";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Keys present in the file override the defaults of `service`; anything
/// left out keeps its service default.
pub fn load_config(path: &Path, service: Service) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, service)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse TOML text on top of the defaults of `service` without validating.
pub fn parse_config(content: &str, service: Service) -> Result<AppConfig, ConfigError> {
    let overrides: toml::Table = toml::from_str(content)?;
    let mut merged = toml::Table::try_from(AppConfig::for_service(service))?;
    merge_tables(&mut merged, overrides);

    Ok(toml::Value::Table(merged).try_into()?)
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_inner)), toml::Value::Table(inner)) => {
                merge_tables(base_inner, inner);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Give a scheme-less collector address (`otel-collector:4317`) an
/// `http://` prefix. Anything else is passed through untouched; an endpoint
/// the exporter still rejects is skipped when telemetry starts.
pub fn normalize_otlp_endpoint(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => raw.to_string(),
        _ if raw.contains("://") || raw.is_empty() => raw.to_string(),
        _ => format!("http://{raw}"),
    }
}

impl AppConfig {
    /// Overlay the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Overlay environment variables read through `lookup`.
    ///
    /// Naming an OTLP endpoint explicitly switches on export of both
    /// signals, whatever the service default was.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_OTLP_ENDPOINT) {
            self.telemetry.otlp_endpoint = normalize_otlp_endpoint(&endpoint);
            self.telemetry.export_traces = true;
            self.telemetry.export_logs = true;
        }

        if let Some(raw) = lookup(ENV_EXPOSE_PORT) {
            let port: u16 = raw.trim().parse().map_err(|_| ConfigError::Env {
                name: ENV_EXPOSE_PORT,
                value: raw.clone(),
            })?;
            let host = self
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.listener.bind_address = format!("{host}:{port}");
        }

        if let Some(one) = lookup(ENV_TARGET_ONE) {
            self.targets.one = one;
        }
        if let Some(two) = lookup(ENV_TARGET_TWO) {
            self.targets.two = two;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DelayMode, DEFAULT_OTLP_ENDPOINT};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_partial_file_keeps_service_defaults() {
        let config = parse_config(
            r#"
            [workload]
            delay_mode = "blocking"
            io_delay_ms = 20
            "#,
            Service::LoadApp,
        )
        .unwrap();

        assert_eq!(config.workload.delay_mode, DelayMode::Blocking);
        assert_eq!(config.workload.io_delay_ms, 20);
        assert_eq!(config.workload.cpu_iterations, 1000);
        assert_eq!(config.telemetry.service_name, "observability-load-app");
        assert!(!config.telemetry.export_logs);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config = parse_config("", Service::TestApp).unwrap();
        assert_eq!(config.telemetry.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
        assert!(config.telemetry.export_traces);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_delay_mode_is_parse_error() {
        let err = parse_config("[workload]\ndelay_mode = \"spin\"\n", Service::TestApp).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::for_service(Service::LoadApp);
        config
            .apply_env(env(&[
                (ENV_OTLP_ENDPOINT, "http://collector:4317"),
                (ENV_EXPOSE_PORT, "9001"),
                (ENV_TARGET_ONE, "svc-one:8000"),
            ]))
            .unwrap();

        assert_eq!(config.telemetry.otlp_endpoint, "http://collector:4317");
        assert!(config.telemetry.export_traces);
        assert!(config.telemetry.export_logs);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9001");
        assert_eq!(config.targets.one, "svc-one:8000");
        assert_eq!(config.targets.two, "localhost:8000");
    }

    #[test]
    fn test_scheme_less_endpoint_gets_http_prefix() {
        let mut config = AppConfig::for_service(Service::TestApp);
        config
            .apply_env(env(&[(ENV_OTLP_ENDPOINT, "otel-collector:4317")]))
            .unwrap();

        assert_eq!(config.telemetry.otlp_endpoint, "http://otel-collector:4317");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_normalize_otlp_endpoint() {
        assert_eq!(normalize_otlp_endpoint("localhost:4317"), "http://localhost:4317");
        assert_eq!(normalize_otlp_endpoint(" https://c:4317 "), "https://c:4317");
        assert_eq!(normalize_otlp_endpoint(DEFAULT_OTLP_ENDPOINT), DEFAULT_OTLP_ENDPOINT);
        assert_eq!(normalize_otlp_endpoint("grpc://c:4317"), "grpc://c:4317");
        assert_eq!(normalize_otlp_endpoint(""), "");
    }

    #[test]
    fn test_no_env_keeps_defaults() {
        let mut config = AppConfig::for_service(Service::TestApp);
        config.apply_env(env(&[])).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.telemetry.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = AppConfig::for_service(Service::TestApp);
        let err = config.apply_env(env(&[(ENV_EXPOSE_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: ENV_EXPOSE_PORT, .. }));
    }
}
