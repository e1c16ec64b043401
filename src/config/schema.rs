//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the license relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Token gate admission rules.
    pub gate: GateConfig,

    /// Fixed-window rate limiting for the token endpoint.
    pub rate_limit: RateLimitConfig,

    /// Where the license token is read from.
    pub secret: SecretConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Admission rules applied before the token is disclosed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Origins allowed to receive the token (scheme://host[:port]).
    /// Matched case-insensitively; duplicates are harmless.
    pub allowed_origins: Vec<String>,

    /// Name of the custom header every browser call must carry.
    pub client_header: String,

    /// Literal value the custom header must hold.
    pub client_header_value: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            client_header: "X-Blazorise-Client".to_string(),
            client_header_value: "1".to_string(),
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests admitted per window, shared by all callers.
    pub permit_limit: u32,

    /// Window length in seconds.
    pub window_secs: u64,

    /// Queued requests beyond the limit. Only 0 (reject immediately) is supported.
    pub queue_limit: u32,

    /// Status code returned when the window is exhausted.
    pub rejection_status: u16,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            permit_limit: 60,
            window_secs: 60,
            queue_limit: 0,
            rejection_status: 429,
        }
    }
}

/// Secret source configuration.
///
/// The token itself never lives in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretConfig {
    /// Environment variable holding the token.
    pub env_var: String,

    /// File holding the token (e.g. a mounted container secret).
    /// Takes precedence over `env_var` when set.
    pub file: Option<PathBuf>,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            env_var: "LICENSE_RELAY_TOKEN".to_string(),
            file: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
