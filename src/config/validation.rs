//! Configuration validation.
//!
//! Serde handles syntax; this checks values against each other. All
//! problems are reported together rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in an [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("workload.root_delay_min_ms ({min}) exceeds root_delay_max_ms ({max})")]
    DelayRange { min: u64, max: u64 },

    #[error("timeouts.request_secs ({request_secs}s) must exceed workload.io_delay_ms ({io_delay_ms}ms)")]
    RequestTimeout { request_secs: u64, io_delay_ms: u64 },
}

/// Check a configuration before it is accepted.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let workload = &config.workload;
    if workload.root_delay_min_ms > workload.root_delay_max_ms {
        errors.push(ValidationError::DelayRange {
            min: workload.root_delay_min_ms,
            max: workload.root_delay_max_ms,
        });
    }

    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    if request_ms == 0 || request_ms <= workload.io_delay_ms {
        errors.push(ValidationError::RequestTimeout {
            request_secs: config.timeouts.request_secs,
            io_delay_ms: workload.io_delay_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
