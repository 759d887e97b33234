//! Edge Gateway
//!
//! A stateless HTTP gateway in front of a single upstream REST API.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                 EDGE GATEWAY                   │
//!                         │                                                │
//!     Client Request      │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!     ────────────────────┼─▶│  http   │──▶│ security │──▶│  routing   │  │
//!                         │  │ server  │   │   cors   │   │ normalizer │  │
//!                         │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!                         │                                     │         │
//!                         │          ┌──────────────┬───────────┤         │
//!                         │          ▼              ▼           ▼         │
//!                         │    ┌──────────┐   ┌─────────┐ ┌──────────┐    │
//!     Client Response     │    │preflight │   │ catalog │ │ upstream │────┼──▶ Upstream
//!     ◀───────────────────┼────│ / robots │   │  store  │ │  client  │◀───┼─── API
//!                         │    └──────────┘   └─────────┘ └──────────┘    │
//!                         │                                                │
//!                         │   config · observability · lifecycle          │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_gateway::config::{load_config, GatewayConfig};
use edge_gateway::lifecycle::{signals, startup, Shutdown};
use edge_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "edge-gateway")]
#[command(about = "Stateless HTTP edge gateway for a single upstream API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        GatewayConfig::default()
    };

    logging::init(&config.observability);
    tracing::info!(config = ?cli.config, "edge-gateway v0.1.0 starting");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let runtime = startup::initialize(config)?;
    let _watcher = runtime.watcher;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.requested();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&shutdown).await;
    });

    runtime.server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
