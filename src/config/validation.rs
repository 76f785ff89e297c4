//! Configuration validation.
//!
//! Serde handles syntax; this checks values. Every problem is reported, not
//! just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{ServerConfig, TimeoutConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.relay_secs ({relay_secs}) must be shorter than timeouts.request_secs ({request_secs})")]
    RelayTimeoutTooLong { relay_secs: u64, request_secs: u64 },

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.relay_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("relay_secs"));
    }
    let TimeoutConfig { request_secs, relay_secs } = config.timeouts;
    if request_secs > 0 && relay_secs >= request_secs {
        errors.push(ValidationError::RelayTimeoutTooLong { relay_secs, request_secs });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "localhost".into();
        config.timeouts.request_secs = 0;
        config.timeouts.relay_secs = 0;
        config.security.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("localhost".into()),
                ValidationError::ZeroTimeout("request_secs"),
                ValidationError::ZeroTimeout("relay_secs"),
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_relay_timeout_must_undercut_request_timeout() {
        let mut config = ServerConfig::default();
        for relay_secs in [30, 45] {
            config.timeouts.relay_secs = relay_secs;
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::RelayTimeoutTooLong { relay_secs, request_secs: 30 }]
            );
        }

        config.timeouts.relay_secs = 29;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nowhere".into())]
        );
    }
}
