//! Front-controller web router.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                 FRONT ROUTER                 │
//!                          │                                              │
//!     Client Request       │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│dispatch │  │
//!                          │  │ server  │    │ matcher  │    │         │  │
//!                          │  └─────────┘    └──────────┘    └────┬────┘  │
//!                          │                                      │       │
//!                          │                                      ▼       │
//!     Client Response      │  ┌─────────┐                   ┌──────────┐  │
//!     ◀────────────────────┼──│response │◀──────────────────│controller│  │
//!                          │  │  JSON   │     Reply/Page    │  action  │  │
//!                          │  └─────────┘                   └──────────┘  │
//!                          │                                              │
//!                          │  config (+ watcher) · observability ·        │
//!                          │  lifecycle (startup, signals, shutdown)      │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use front_router::config::{load_config, watcher::ConfigWatcher, AppConfig};
use front_router::controllers;
use front_router::http::HttpServer;
use front_router::lifecycle::{signals, Shutdown};
use front_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "front-router")]
#[command(about = "Front-controller web router", long_about = None)]
struct Cli {
    /// TOML configuration file. Without it the built-in demo routes are served.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and route targets, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "front-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.listener.request_timeout_secs,
        "Configuration loaded"
    );

    let handlers = Arc::new(controllers::registry());
    let server = HttpServer::new(config.clone(), handlers)?;

    if cli.check {
        tracing::info!("Configuration OK");
        return Ok(());
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Held for the lifetime of the server; dropping it stops the watch.
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(handle) => {
                    server.watch_config(updates);
                    Some(handle)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Config watcher unavailable, hot reload disabled");
                    None
                }
            }
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
