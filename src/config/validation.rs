//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (gateway error status is a 5xx)
//! - Check that rewrite rules and route literals are absolute paths
//! - Reject a wildcard entry inside a strict allow-list
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{CorsMode, GatewayConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let upstream = &config.upstream;
    if upstream.scheme != "http" && upstream.scheme != "https" {
        errors.push(ValidationError::new(
            "upstream.scheme",
            format!("unsupported scheme '{}'", upstream.scheme),
        ));
    }
    let bare_host = match url::Url::parse(&upstream.base_url()) {
        Ok(parsed) => parsed.has_host() && parsed.path() == "/" && !upstream.host.contains('/'),
        Err(_) => false,
    };
    if !bare_host {
        errors.push(ValidationError::new(
            "upstream.host",
            format!("'{}' is not a bare host[:port]", upstream.host),
        ));
    }
    if !(500..=599).contains(&upstream.transport_error_status) {
        errors.push(ValidationError::new(
            "upstream.transport_error_status",
            format!("{} is not a 5xx status", upstream.transport_error_status),
        ));
    }

    for (i, rule) in config.routing.prefix_rules.iter().enumerate() {
        if !rule.prefix.starts_with('/') {
            errors.push(ValidationError::new(
                format!("routing.prefix_rules[{}].prefix", i),
                "must start with '/'",
            ));
        }
    }
    for (field, path) in [
        ("routing.catalog_path", &config.routing.catalog_path),
        ("routing.robots_path", &config.routing.robots_path),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
        }
    }

    if config.cors.policy == CorsMode::Strict && config.cors.allowed_origins.iter().any(|o| o == "*") {
        errors.push(ValidationError::new(
            "cors.allowed_origins",
            "'*' is not allowed with the strict policy; use policy = \"wildcard\"",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
