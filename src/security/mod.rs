//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Token request:
//!     → access_control.rs (client header, then Origin against origins.rs)
//!     → rate_limit.rs (shared fixed-window budget)
//!     → gate.rs releases secret.rs token
//!     → headers.rs (no-store hardening on the response)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - All state except the limiter counter is immutable after startup
//! - The token is only reachable through `TokenGate::admit`

pub mod access_control;
pub mod gate;
pub mod headers;
pub mod origins;
pub mod rate_limit;
pub mod secret;

pub use access_control::AccessPolicy;
pub use gate::{GateRejection, TokenGate};
pub use origins::AllowedOrigins;
pub use rate_limit::{Admission, Clock, FixedWindowLimiter, SystemClock};
pub use secret::{load_secret, LicenseSecret, SecretError};
