//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate origin entries (scheme, host, no path)
//! - Validate value ranges (window > 0, permit limit > 0, queue limit == 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("gate.allowed_origins must list at least one origin")]
    NoAllowedOrigins,

    #[error("invalid origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: &'static str },

    #[error("invalid client header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid client header value {0:?}")]
    InvalidHeaderValue(String),

    #[error("rate_limit.permit_limit must be greater than zero")]
    ZeroPermitLimit,

    #[error("rate_limit.window_secs must be greater than zero")]
    ZeroWindow,

    #[error("rate_limit.queue_limit must be 0, got {0}")]
    QueueingUnsupported(u32),

    #[error("rate_limit.rejection_status {0} is not a 4xx/5xx status")]
    InvalidRejectionStatus(u16),

    #[error("invalid listener.bind_address {0:?}")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.gate.allowed_origins.is_empty() {
        errors.push(ValidationError::NoAllowedOrigins);
    }
    for origin in &config.gate.allowed_origins {
        if let Err(reason) = check_origin(origin) {
            errors.push(ValidationError::InvalidOrigin {
                origin: origin.clone(),
                reason,
            });
        }
    }

    if HeaderName::from_bytes(config.gate.client_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(
            config.gate.client_header.clone(),
        ));
    }
    if config.gate.client_header_value.is_empty()
        || HeaderValue::from_str(&config.gate.client_header_value).is_err()
    {
        errors.push(ValidationError::InvalidHeaderValue(
            config.gate.client_header_value.clone(),
        ));
    }

    let limits = &config.rate_limit;
    if limits.permit_limit == 0 {
        errors.push(ValidationError::ZeroPermitLimit);
    }
    if limits.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow);
    }
    if limits.queue_limit != 0 {
        errors.push(ValidationError::QueueingUnsupported(limits.queue_limit));
    }
    match StatusCode::from_u16(limits.rejection_status) {
        Ok(status) if status.is_client_error() || status.is_server_error() => {}
        _ => errors.push(ValidationError::InvalidRejectionStatus(
            limits.rejection_status,
        )),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An origin is exactly `scheme://host[:port]` as a browser would send it.
fn check_origin(origin: &str) -> Result<(), &'static str> {
    if origin.trim() == "*" {
        return Err("wildcard origins are not allowed");
    }
    if origin.trim() != origin {
        return Err("surrounding whitespace");
    }

    let url = Url::parse(origin).map_err(|_| "not an absolute URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err("scheme must be http or https");
    }
    if url.host_str().is_none() {
        return Err("missing host");
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err("credentials are not part of an origin");
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query or fragment is not part of an origin");
    }
    // Url normalizes "https://a.example" to path "/", so only the raw text tells
    // us whether a path (even a trailing slash) was written.
    let (_, authority) = origin
        .split_once("://")
        .ok_or("origin must be written as scheme://host")?;
    if authority.contains('/') {
        return Err("path is not part of an origin");
    }

    Ok(())
}
