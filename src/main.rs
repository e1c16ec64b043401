//! License token relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                LICENSE RELAY                 │
//!                          │                                              │
//!   Browser request        │  ┌──────────┐   ┌──────────┐   ┌──────────┐ │
//!   ───────────────────────┼─▶│  http    │──▶│   cors   │──▶│  token   │ │
//!                          │  │ server   │   │  layer   │   │  gate    │ │
//!                          │  └──────────┘   └──────────┘   └────┬─────┘ │
//!                          │                                    │       │
//!                          │             header → origin → rate limit   │
//!                          │                                    │       │
//!   {"token": ...}         │  ┌──────────┐                      ▼       │
//!   ◀──────────────────────┼──│ no-store │◀───────────── license token  │
//!                          │  │ response │                              │
//!                          │  └──────────┘                              │
//!                          │                                              │
//!                          │  config · secret · observability · lifecycle │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use license_relay::http::HttpServer;
use license_relay::lifecycle::{signals, startup, Overrides, Shutdown};
use license_relay::observability::logging;

#[derive(Parser)]
#[command(name = "license-relay")]
#[command(about = "Serves a license token to allowed browser origins", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Replace gate.allowed_origins (repeatable).
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::load(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            allowed_origins: cli.allowed_origins,
        },
    )?;

    logging::init_logging(&config.observability)?;

    tracing::info!("license-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let gate = match startup::build_gate(&config) {
        Ok(gate) => gate,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            return Err(e.into());
        }
    };

    startup::start_metrics(&config)?;

    let listener = startup::bind(&config).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, gate);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
