//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (group depth > 0, bind and metrics addresses parse)
//! - Check header names and log level are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("router.routes must name a route source")]
    MissingRoutes,

    #[error("router.separator must not be empty")]
    EmptySeparator,

    #[error("router.max_group_depth must be at least 1")]
    ZeroGroupDepth,

    #[error("router.headers: `{0}` is not a valid header name")]
    InvalidHeaderName(String),

    #[error("router.headers: value of `{0}` is not a valid header value")]
    InvalidHeaderValue(String),

    #[error("router.content_type `{0}` is not a valid header value")]
    InvalidContentType(String),

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let router = &config.router;
    if router.routes.trim().is_empty() {
        errors.push(ValidationError::MissingRoutes);
    }
    if router.separator.is_empty() {
        errors.push(ValidationError::EmptySeparator);
    }
    if router.max_group_depth == 0 {
        errors.push(ValidationError::ZeroGroupDepth);
    }
    for (name, value) in &router.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.clone()));
        } else if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue(name.clone()));
        }
    }
    if let Some(content_type) = &router.content_type {
        if HeaderValue::from_str(content_type).is_err() {
            errors.push(ValidationError::InvalidContentType(content_type.clone()));
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
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
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "nowhere".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.router.separator.clear();
        config.router.max_group_depth = 0;
        config.router.headers.insert("bad header".into(), "x".into());
        config.observability.log_level = "loud".into();
        config.observability.metrics_address = "nowhere:port".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("nowhere".into()),
                ValidationError::EmptySeparator,
                ValidationError::ZeroGroupDepth,
                ValidationError::InvalidHeaderName("bad header".into()),
                ValidationError::InvalidLogLevel("loud".into()),
                ValidationError::InvalidMetricsAddress("nowhere:port".into()),
            ]
        );
    }
}
