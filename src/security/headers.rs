//! Cache hardening for responses that carry the license token.
//!
//! `Cache-Control: no-store` and `Pragma: no-cache` keep browsers and
//! intermediaries from persisting the token. `Vary: Origin` keeps shared caches
//! from replaying one origin's response to another.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, PRAGMA, VARY};

pub const NO_STORE_HEADERS: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-store"),
    (PRAGMA, "no-cache"),
    (VARY, "Origin"),
];

/// Apply the no-store header set, replacing any existing values.
pub fn apply_no_store(headers: &mut HeaderMap) {
    for (name, value) in NO_STORE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
