//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the token and health handlers
//! - Wire up middleware (request ID, tracing, timeout, CORS)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::cors::cors_layer;
use crate::http::handlers::{healthz, issue_token};
use crate::http::request::{request_id, UuidRequestId};
use crate::security::TokenGate;

pub const TOKEN_PATH: &str = "/licensing/token";
pub const HEALTH_PATH: &str = "/healthz";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<TokenGate>,
}

/// HTTP server for the license relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and gate.
    pub fn new(config: RelayConfig, gate: Arc<TokenGate>) -> Self {
        let router = build_router(&config, gate);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RelayConfig, gate: Arc<TokenGate>) -> Router {
    let cors = cors_layer(gate.policy().origins().clone());

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route(TOKEN_PATH, get(issue_token).layer(cors))
        .route(HEALTH_PATH, get(healthz))
        .with_state(AppState { gate })
        .layer(middleware)
}
