//! Form Submission Relay
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                EVENTS RELAY                  │
//!   Browser / caller     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────────┼─▶│   http   │──▶│  relay   │──▶│ mapping  │  │
//!                        │  │  server  │   │ handler  │   │ payload  │  │
//!                        │  └──────────┘   └────┬─────┘   └──────────┘  │
//!                        │                      │                       │
//!                        │        config::relay │ (env, every request)  │
//!                        │                      ▼                       │
//!   JSON envelope        │                 ┌──────────┐                 │   Form
//!   ◀────────────────────┼─────────────────│  relay   │─────────────────┼─▶ service
//!                        │                 │  client  │                 │
//!                        │                 └──────────┘                 │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │ config · security · observability ·    │  │
//!                        │  │ lifecycle                              │  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use events_relay::config::loader::load_or_default;
use events_relay::observability::{init_logging, metrics};
use events_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "events-relay", version, about = "Relay JSON form submissions to a form service")]
struct Args {
    /// Server configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, env = "EVENTS_RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    init_logging(&config.observability.log_level);

    tracing::info!("events-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        relay_timeout_secs = config.timeouts.relay_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
