//! Token gate: the per-request disclosure decision.
//!
//! ```text
//! request
//!     → client header check   (403 on failure)
//!     → origin check          (403 on failure)
//!     → fixed-window limiter  (429 on failure)
//!     → disclose token
//! ```
//!
//! The limiter runs last so that only requests which already passed the header
//! and origin checks spend budget. Requests from disallowed origins are turned
//! away before they can touch the shared counter.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};

use crate::config::{RelayConfig, ValidationError};
use crate::security::access_control::AccessPolicy;
use crate::security::rate_limit::{Admission, FixedWindowLimiter};
use crate::security::secret::LicenseSecret;

/// Why the gate refused to disclose the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("client header missing or incorrect")]
    ClientHeader,

    #[error("origin missing or not allowed")]
    Origin,

    #[error("token rate limit exhausted, retry in {retry_after:?}")]
    RateLimited { retry_after: Duration },
}

impl GateRejection {
    /// Label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            GateRejection::ClientHeader => "client_header",
            GateRejection::Origin => "origin",
            GateRejection::RateLimited { .. } => "rate_limited",
        }
    }
}

/// Immutable gate state shared by every request handler.
#[derive(Debug)]
pub struct TokenGate {
    policy: AccessPolicy,
    limiter: FixedWindowLimiter,
    secret: LicenseSecret,
    rate_limited_status: StatusCode,
}

impl TokenGate {
    pub fn new(
        policy: AccessPolicy,
        limiter: FixedWindowLimiter,
        secret: LicenseSecret,
        rate_limited_status: StatusCode,
    ) -> Self {
        Self {
            policy,
            limiter,
            secret,
            rate_limited_status,
        }
    }

    /// Build the gate from a validated config and the loaded secret.
    pub fn from_config(
        config: &RelayConfig,
        secret: LicenseSecret,
    ) -> Result<Arc<Self>, ValidationError> {
        let policy = AccessPolicy::from_config(&config.gate).ok_or_else(|| {
            ValidationError::InvalidHeaderName(config.gate.client_header.clone())
        })?;
        let status = StatusCode::from_u16(config.rate_limit.rejection_status).map_err(|_| {
            ValidationError::InvalidRejectionStatus(config.rate_limit.rejection_status)
        })?;

        Ok(Arc::new(Self::new(
            policy,
            FixedWindowLimiter::from_config(&config.rate_limit),
            secret,
            status,
        )))
    }

    /// Run the admission checks in order and return the token if all pass.
    ///
    /// Only a request that reaches the limiter consumes a permit.
    pub fn admit(&self, headers: &HeaderMap) -> Result<&LicenseSecret, GateRejection> {
        self.policy.check_client_header(headers)?;
        self.policy.check_origin(headers)?;

        match self.limiter.try_acquire() {
            Admission::Admitted { .. } => Ok(&self.secret),
            Admission::Rejected { retry_after } => {
                Err(GateRejection::RateLimited { retry_after })
            }
        }
    }

    /// Status code for a rejection. Header and origin failures share 403.
    pub fn status_for(&self, rejection: &GateRejection) -> StatusCode {
        match rejection {
            GateRejection::ClientHeader | GateRejection::Origin => StatusCode::FORBIDDEN,
            GateRejection::RateLimited { .. } => self.rate_limited_status,
        }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn limiter(&self) -> &FixedWindowLimiter {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::origins::AllowedOrigins;
    use crate::security::rate_limit::tests::MockClock;
    use axum::http::{HeaderName, HeaderValue};
    use std::time::Instant;

    fn gate(limit: u32) -> (TokenGate, MockClock) {
        let clock = MockClock::new(Instant::now());
        let limiter =
            FixedWindowLimiter::with_clock(limit, Duration::from_secs(60), Arc::new(clock.clone()));
        let policy = AccessPolicy::new(
            HeaderName::from_static("x-blazorise-client"),
            HeaderValue::from_static("1"),
            AllowedOrigins::new(["https://a.example"]),
        );
        let gate = TokenGate::new(
            policy,
            limiter,
            LicenseSecret::new("T1").unwrap(),
            StatusCode::TOO_MANY_REQUESTS,
        );
        (gate, clock)
    }

    fn request(client: Option<&'static str>, origin: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = client {
            headers.insert("x-blazorise-client", HeaderValue::from_static(value));
        }
        if let Some(value) = origin {
            headers.insert("origin", HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_scenario_two_per_minute() {
        let (gate, _clock) = gate(2);
        let ok = request(Some("1"), Some("https://a.example"));

        assert_eq!(gate.admit(&ok).unwrap().expose(), "T1");
        assert_eq!(gate.admit(&ok).unwrap().expose(), "T1");

        let third = gate.admit(&ok).unwrap_err();
        assert!(matches!(third, GateRejection::RateLimited { .. }));
        assert_eq!(gate.status_for(&third), StatusCode::TOO_MANY_REQUESTS);

        let other = gate
            .admit(&request(Some("1"), Some("https://b.example")))
            .unwrap_err();
        assert_eq!(other, GateRejection::Origin);
        assert_eq!(gate.status_for(&other), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_header_checked_before_origin() {
        let (gate, _clock) = gate(5);

        assert_eq!(
            gate.admit(&request(None, Some("https://b.example"))),
            Err(GateRejection::ClientHeader)
        );
        assert_eq!(
            gate.admit(&request(Some("0"), None)),
            Err(GateRejection::ClientHeader)
        );
        assert_eq!(
            gate.admit(&request(Some("1"), None)),
            Err(GateRejection::Origin)
        );
    }

    #[test]
    fn test_rejected_requests_do_not_spend_budget() {
        let (gate, _clock) = gate(1);

        for _ in 0..10 {
            assert!(gate.admit(&request(None, Some("https://a.example"))).is_err());
            assert!(gate.admit(&request(Some("1"), Some("https://b.example"))).is_err());
        }

        assert!(gate
            .admit(&request(Some("1"), Some("https://a.example")))
            .is_ok());
    }

    #[test]
    fn test_budget_returns_after_window() {
        let (gate, clock) = gate(1);
        let ok = request(Some("1"), Some("https://A.Example"));

        assert!(gate.admit(&ok).is_ok());
        assert!(gate.admit(&ok).is_err());

        clock.advance(Duration::from_secs(60));
        assert!(gate.admit(&ok).is_ok());
    }

    #[test]
    fn test_from_config_uses_rejection_status() {
        let mut config = RelayConfig::default();
        config.gate.allowed_origins = vec!["https://a.example".into()];
        config.rate_limit.rejection_status = 503;

        let gate = TokenGate::from_config(&config, LicenseSecret::new("T1").unwrap()).unwrap();
        let rejection = GateRejection::RateLimited {
            retry_after: Duration::from_secs(1),
        };
        assert_eq!(gate.status_for(&rejection), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(gate.limiter().permit_limit(), 60);
    }
}
