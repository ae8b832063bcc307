//! Submission relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser (index.html + submit.js)
//!         │  POST /api/submit  { EmployeeID, RequestNumber, filename?, fileBase64 }
//!         ▼
//!     ┌───────────────────────────────────────────────┐
//!     │                 SUBMIT RELAY                   │
//!     │  http::server ─▶ relay::handler ─▶ upstream   │──▶ POST TARGET_FUNCTION_URL?code=FUNCTION_KEY
//!     │       ▲                              │        │
//!     │       └──── JSON (normalized) ◀──────┘        │◀── upstream reply
//!     └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use submit_relay::config::{load_config, RelayConfig, ServerConfig, UpstreamSource};
use submit_relay::lifecycle::{wait_for_signal, Shutdown};
use submit_relay::observability::init_logging;
use submit_relay::HttpServer;

#[derive(Parser)]
#[command(name = "submit-relay")]
#[command(about = "Relays form submissions to the configured upstream function", long_about = None)]
struct Args {
    /// Path to a TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "submit-relay starting"
    );

    // Read per request as well; this only flags a misconfiguration early.
    if RelayConfig::from_env().is_none() {
        tracing::warn!("TARGET_FUNCTION_URL or FUNCTION_KEY is not set; submissions will be answered with 500");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, UpstreamSource::Environment)?;

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
