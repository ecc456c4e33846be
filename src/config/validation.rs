//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Settings;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("reload.channel_capacity must be greater than zero")]
    ZeroCapacity,

    #[error("storage.endpoints_path must not be empty")]
    EmptyEndpointsPath,

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
}

pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: settings.listener.bind_address.clone(),
        });
    }

    if settings.reload.channel_capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    if settings.storage.endpoints_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyEndpointsPath);
    }

    let level = settings.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            settings.observability.log_level.clone(),
        ));
    }

    if settings.observability.metrics_enabled
        && settings
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: settings.observability.metrics_address.clone(),
        });
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
    fn test_defaults_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut settings = Settings::default();
        settings.listener.bind_address = "localhost".into();
        settings.reload.channel_capacity = 0;
        settings.observability.log_level = "loud".into();

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroCapacity));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut settings = Settings::default();
        settings.observability.metrics_address = "nowhere".into();
        assert!(validate_settings(&settings).is_ok());

        settings.observability.metrics_enabled = true;
        assert!(validate_settings(&settings).is_err());
    }
}
