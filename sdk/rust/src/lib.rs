//! Client helper for the license relay.

pub mod client;

pub use client::{ClientError, RelayClient, DEFAULT_CLIENT_HEADER};
