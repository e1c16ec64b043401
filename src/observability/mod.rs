//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Token gate and HTTP layer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (outcome counters, latency histogram)
//!     → tower_http TraceLayer spans carrying the request ID
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every log line of a request
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
