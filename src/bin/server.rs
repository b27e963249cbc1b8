use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use country_grid::dataset::CountryTable;
use country_grid::env_config;
use country_grid::server::{create_router, AppState};

#[derive(Parser)]
#[command(name = "country-grid-server")]
#[command(about = "Serve country grid games over HTTP")]
struct Cli {
    /// Dataset file (overrides COUNTRY_GRID_DATA)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port (overrides COUNTRY_GRID_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixed RNG seed (overrides COUNTRY_GRID_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_config::init_logging(cli.verbose)?;
    let _base = env_config::init_base_path()?;

    let data = cli.data.unwrap_or_else(env_config::data_path);
    let port = cli.port.unwrap_or_else(env_config::server_port);
    let seed = cli.seed.or_else(env_config::rng_seed);

    let table = match CountryTable::load(&data) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "game not initialized");
            return Err(e).context("country data unavailable");
        }
    };
    if table.is_empty() {
        warn!(path = %data.display(), "country table is empty; every guess will be unknown");
    }

    let app = create_router(Arc::new(AppState::new(Arc::new(table), seed)));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    info!(port, "server is running, press Ctrl+C to stop");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("stopping server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
