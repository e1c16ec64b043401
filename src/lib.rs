//! License token relay.
//!
//! A backend-for-frontend that holds a vendor license token on the server and
//! hands it to browser clients that pass the token gate: a static client
//! header, an origin allow-list, and a shared fixed-window rate limit.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::TokenGate;
