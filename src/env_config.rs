//! Shared environment configuration for the country-grid binaries.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `COUNTRY_GRID_BASE_PATH` | `.` | Working directory for every binary; data paths resolve against it |
//! | `COUNTRY_GRID_DATA` | `lightweight_countries_data.json` | Dataset file |
//! | `COUNTRY_GRID_PORT` | `9000` | HTTP port for the server |
//! | `COUNTRY_GRID_SEED` | unset | Fixed RNG seed; unset means OS entropy |
//! | `COUNTRY_GRID_LOG` | unset | `debug` turns on per-guess logging |

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::constants::DEFAULT_DATA_PATH;

/// Read `COUNTRY_GRID_BASE_PATH` (default `"."`) and chdir into it.
pub fn init_base_path() -> Result<PathBuf> {
    let base_path = std::env::var("COUNTRY_GRID_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(&base_path);
    std::env::set_current_dir(&path)
        .with_context(|| format!("failed to change directory to {}", base_path))?;
    if let Ok(cwd) = std::env::current_dir() {
        info!(cwd = %cwd.display(), "working directory");
    }
    Ok(path)
}

/// Read `COUNTRY_GRID_DATA` (default [`DEFAULT_DATA_PATH`]).
pub fn data_path() -> PathBuf {
    std::env::var("COUNTRY_GRID_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Read `COUNTRY_GRID_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("COUNTRY_GRID_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}

/// Read `COUNTRY_GRID_SEED`. Unparseable values are ignored.
pub fn rng_seed() -> Option<u64> {
    std::env::var("COUNTRY_GRID_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Install the global compact subscriber. `verbose` or `COUNTRY_GRID_LOG=debug`
/// selects DEBUG, otherwise INFO.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_debug = std::env::var("COUNTRY_GRID_LOG")
        .map(|v| v.eq_ignore_ascii_case("debug"))
        .unwrap_or(false);
    let level = if verbose || env_debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(())
}
