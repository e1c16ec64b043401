//! CORS policy for the token endpoint.
//!
//! Browsers only expose the token response to pages whose origin is echoed in
//! `Access-Control-Allow-Origin`, so the CORS allow-list is exactly the gate's
//! origin set, compared the same case-insensitive way. Any method and any
//! request header may be used; credentials are not allowed.

use axum::http::{request::Parts, HeaderValue};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::security::AllowedOrigins;

pub fn cors_layer(origins: AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origins.contains(o))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(Any)
        .allow_headers(Any)
}
