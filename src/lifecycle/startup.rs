//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Load the license token and build the gate
//! - Bind the listener last, so traffic is only accepted when ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A missing token stops startup before a socket is bound

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{load_config, validation::validate_config, ConfigError, RelayConfig};
use crate::config::ValidationError;
use crate::security::{load_secret, SecretError, TokenGate};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("secret error: {0}")]
    Secret(#[from] SecretError),

    #[error("invalid gate configuration: {0}")]
    Gate(#[from] ValidationError),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Command-line adjustments applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub allowed_origins: Vec<String>,
}

/// Load the config file (or defaults), apply overrides, and validate the result.
pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<RelayConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if !overrides.allowed_origins.is_empty() {
        config.gate.allowed_origins = overrides.allowed_origins;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load the secret and build the gate. No socket is touched.
pub fn build_gate(config: &RelayConfig) -> Result<Arc<TokenGate>, StartupError> {
    let secret = load_secret(&config.secret)?;
    let gate = TokenGate::from_config(config, secret)?;

    tracing::info!(
        allowed_origins = gate.policy().origins().len(),
        permit_limit = gate.limiter().permit_limit(),
        window_secs = gate.limiter().window().as_secs(),
        "Token gate ready"
    );
    Ok(gate)
}

/// Install the Prometheus exporter if enabled.
pub fn start_metrics(config: &RelayConfig) -> Result<(), StartupError> {
    let observability = &config.observability;
    if !observability.metrics_enabled {
        return Ok(());
    }

    let addr: SocketAddr = observability
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(observability.metrics_address.clone()))?;
    crate::observability::metrics::init_metrics(addr)?;
    Ok(())
}

/// Bind the configured listener address.
pub async fn bind(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    let address = &config.listener.bind_address;
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })
}
