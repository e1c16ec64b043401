//! Route handlers.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header::ORIGIN, HeaderMap},
    response::Response,
};

use crate::http::response::{rejection_response, token_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::GateRejection;

/// Liveness probe. Independent of the gate.
pub async fn healthz() -> &'static str {
    "ok"
}

/// `GET /licensing/token`: disclose the license token if the gate admits the
/// request.
pub async fn issue_token(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();

    match state.gate.admit(&headers) {
        Ok(secret) => {
            metrics::record_token_request("granted", start);
            tracing::debug!(origin = ?origin_of(&headers), "License token issued");
            token_response(secret)
        }
        Err(rejection) => {
            metrics::record_token_request(rejection.reason(), start);
            match rejection {
                GateRejection::RateLimited { retry_after } => tracing::warn!(
                    origin = ?origin_of(&headers),
                    retry_after_ms = retry_after.as_millis() as u64,
                    "Token rate limit exceeded"
                ),
                _ => tracing::debug!(
                    origin = ?origin_of(&headers),
                    reason = rejection.reason(),
                    "Token request rejected"
                ),
            }
            rejection_response(state.gate.status_for(&rejection))
        }
    }
}

fn origin_of(headers: &HeaderMap) -> Option<&str> {
    headers.get(ORIGIN).and_then(|v| v.to_str().ok())
}
