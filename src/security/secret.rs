//! License token loading.
//!
//! The token comes from outside the config file: a mounted secret file when
//! `secret.file` is set, otherwise an environment variable. A missing or blank
//! token is an error so the relay never serves an empty token.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SecretConfig;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("license token not configured: environment variable {env_var} is unset")]
    Missing { env_var: String },

    #[error("failed to read license token from {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("license token from {location} is empty")]
    Empty { location: String },
}

/// The shared license token.
///
/// `Debug` is redacted so the value cannot leak through logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseSecret(String);

impl LicenseSecret {
    /// Wraps a token, trimming surrounding whitespace and rejecting blank values.
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw token. Only the disclosure response should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LicenseSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LicenseSecret(***)")
    }
}

/// Load the license token from the configured source.
pub fn load_secret(config: &SecretConfig) -> Result<LicenseSecret, SecretError> {
    match &config.file {
        Some(path) => load_from_file(path),
        None => load_from_env(&config.env_var),
    }
}

fn load_from_file(path: &Path) -> Result<LicenseSecret, SecretError> {
    let raw = fs::read_to_string(path).map_err(|source| SecretError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    LicenseSecret::new(raw).ok_or_else(|| SecretError::Empty {
        location: path.display().to_string(),
    })
}

fn load_from_env(var: &str) -> Result<LicenseSecret, SecretError> {
    let raw = std::env::var(var).map_err(|_| SecretError::Missing {
        env_var: var.to_string(),
    })?;
    LicenseSecret::new(raw).ok_or_else(|| SecretError::Empty {
        location: format!("environment variable {var}"),
    })
}
