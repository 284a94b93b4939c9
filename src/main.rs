//! Game gateway
//!
//! Static frontend plus a pass-through proxy to a linked backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌───────────────────────────────────────────┐
//!                          │                 GATEWAY                   │
//!                          │                                           │
//!    process env ─────────▶│  config + discovery ──▶ ResolvedConfig    │
//!                          │                              │ (Arc)      │
//!                          │                              ▼            │
//!    Client ──────────────▶│  http::server ──┬──▶ proxy (backend_path) ─┼──▶ Backend
//!                          │                 │                         │
//!                          │                 └──▶ frontend (static dir) │
//!                          │                                           │
//!                          │  observability: tracing, metrics          │
//!                          │  lifecycle: signals, graceful shutdown    │
//!                          └───────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use game_gateway::lifecycle::Shutdown;
use game_gateway::observability::{logging, metrics};
use game_gateway::{GatewayServer, ResolvedConfig};

#[derive(Parser)]
#[command(name = "game-gateway")]
#[command(about = "Static frontend and backend proxy for the game", long_about = None)]
struct Cli {
    /// Directory served under the frontend path (overrides STATIC_DIR).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging();

    let mut config = ResolvedConfig::from_process_env();
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing::info!("game-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    if let Some(address) = &config.metrics_address {
        match address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    GatewayServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
