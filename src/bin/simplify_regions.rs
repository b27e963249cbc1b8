//! Offline clean-up: collapse sub-regions in the dataset file in place.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use country_grid::env_config;
use country_grid::region::simplify_file;

#[derive(Parser)]
#[command(name = "country-grid-simplify-regions")]
#[command(about = "Rewrite dataset regions to canonical names")]
struct Cli {
    /// Dataset file to rewrite, relative to COUNTRY_GRID_BASE_PATH (defaults to COUNTRY_GRID_DATA)
    path: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_config::init_logging(cli.verbose)?;
    let _base = env_config::init_base_path()?;

    let path = cli.path.unwrap_or_else(env_config::data_path);
    let changed = simplify_file(&path)
        .with_context(|| format!("failed to simplify regions in {}", path.display()))?;
    info!(path = %path.display(), changed, "regions simplified and saved");
    Ok(())
}
