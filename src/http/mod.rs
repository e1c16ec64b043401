//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → cors.rs (preflight and allow-origin for the token route)
//!     → handlers.rs (healthz, token gate)
//!     → response.rs (token payload or bare rejection status)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer, HEALTH_PATH, TOKEN_PATH};
