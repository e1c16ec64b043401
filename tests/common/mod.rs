//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use license_relay::config::RelayConfig;
use license_relay::http::{build_router, HttpServer};
use license_relay::lifecycle::Shutdown;
use license_relay::security::LicenseSecret;
use license_relay::TokenGate;
use tokio::net::TcpListener;

pub const SECRET: &str = "T1";
pub const ALLOWED: &str = "https://a.example";

/// Config with one allowed origin and the given limiter settings.
pub fn test_config(permit_limit: u32, window_secs: u64) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.gate.allowed_origins = vec![ALLOWED.into()];
    config.rate_limit.permit_limit = permit_limit;
    config.rate_limit.window_secs = window_secs;
    config
}

pub fn test_gate(config: &RelayConfig) -> Arc<TokenGate> {
    TokenGate::from_config(config, LicenseSecret::new(SECRET).unwrap()).unwrap()
}

#[allow(dead_code)]
pub fn test_router(permit_limit: u32, window_secs: u64) -> Router {
    let config = test_config(permit_limit, window_secs);
    let gate = test_gate(&config);
    build_router(&config, gate)
}

/// GET /licensing/token with optional client header and origin.
#[allow(dead_code)]
pub fn token_request(client: Option<&str>, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/licensing/token");
    if let Some(value) = client {
        builder = builder.header("X-Blazorise-Client", value);
    }
    if let Some(value) = origin {
        builder = builder.header("Origin", value);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Spawn a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let gate = test_gate(&config);
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, gate);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
