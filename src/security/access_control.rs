//! Header and origin admission checks.
//!
//! The client header is a static, publicly visible marker that the browser
//! application always sends. It filters out casual scripted fetches and
//! link-followers; it is obscurity, not authentication, and must not be
//! treated as proof of who is calling. The origin check is the actual access
//! decision, and it relies on browsers setting `Origin` honestly.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, ORIGIN};

use crate::config::GateConfig;
use crate::security::gate::GateRejection;
use crate::security::origins::AllowedOrigins;

/// Header and origin rules, built once from config.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    client_header: HeaderName,
    client_header_value: HeaderValue,
    origins: AllowedOrigins,
}

impl AccessPolicy {
    pub fn new(
        client_header: HeaderName,
        client_header_value: HeaderValue,
        origins: AllowedOrigins,
    ) -> Self {
        Self {
            client_header,
            client_header_value,
            origins,
        }
    }

    /// Build from a validated config. Returns `None` if the header name or value
    /// is malformed, which validation already rules out.
    pub fn from_config(config: &GateConfig) -> Option<Self> {
        let name = HeaderName::from_bytes(config.client_header.as_bytes()).ok()?;
        let value = HeaderValue::from_str(&config.client_header_value).ok()?;
        Some(Self::new(
            name,
            value,
            AllowedOrigins::new(&config.allowed_origins),
        ))
    }

    /// Step 1: the client header must be present with the exact expected value.
    pub fn check_client_header(&self, headers: &HeaderMap) -> Result<(), GateRejection> {
        match headers.get(&self.client_header) {
            Some(value) if value.as_bytes() == self.client_header_value.as_bytes() => Ok(()),
            _ => Err(GateRejection::ClientHeader),
        }
    }

    /// Step 2: `Origin` must be present, non-empty and in the allowed set.
    pub fn check_origin(&self, headers: &HeaderMap) -> Result<(), GateRejection> {
        let origin = headers
            .get(ORIGIN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if self.origins.contains(origin) {
            Ok(())
        } else {
            Err(GateRejection::Origin)
        }
    }

    pub fn origins(&self) -> &AllowedOrigins {
        &self.origins
    }

    pub fn client_header(&self) -> &HeaderName {
        &self.client_header
    }
}
