//! Terminal presentation layer: print the grid, read guesses from stdin.
//!
//! Input lines are `ROW COL COUNTRY NAME` with 1-based row and column,
//! `show` to redraw, or `quit`.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use country_grid::constants::GRID_SIZE;
use country_grid::dataset::CountryTable;
use country_grid::env_config;
use country_grid::presentation::{on_cell_clicked, Presenter, TextPresenter};
use country_grid::sampler::sample_conditions;
use country_grid::session::GridSession;

#[derive(Parser)]
#[command(name = "country-grid-play")]
#[command(about = "Play a country grid in the terminal")]
struct Cli {
    /// Dataset file (overrides COUNTRY_GRID_DATA)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Fixed RNG seed (overrides COUNTRY_GRID_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_guess(line: &str) -> Option<(usize, usize, &str)> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    let name = parts.next()?.trim();
    if row == 0 || col == 0 || row > GRID_SIZE || col > GRID_SIZE || name.is_empty() {
        return None;
    }
    Some((row - 1, col - 1, name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_config::init_logging(cli.verbose)?;
    let _base = env_config::init_base_path()?;

    let data = cli.data.unwrap_or_else(env_config::data_path);
    let table = CountryTable::load(&data).context("country data unavailable")?;

    let mut rng = match cli.seed.or_else(env_config::rng_seed) {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_os_rng(),
    };
    let mut session = GridSession::new(Arc::new(table), sample_conditions(&mut rng));

    let mut presenter = TextPresenter::new(std::io::stdout());
    presenter.show_grid(&session);
    presenter.line(format_args!("Enter `ROW COL COUNTRY`, `show`, or `quit`."));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if let Some(e) = presenter.take_error() {
            return Err(e).context("failed to write to stdout");
        }
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "show" => presenter.show_grid(&session),
            _ => match parse_guess(line) {
                Some((row, col, name)) => {
                    on_cell_clicked(&mut session, &mut presenter, row, col, name)?;
                    if session.is_complete() {
                        presenter.line(format_args!("All {} cells filled.", GRID_SIZE * GRID_SIZE));
                        break;
                    }
                }
                None => presenter.line(format_args!(
                    "Expected `ROW COL COUNTRY` with ROW and COL in 1..={GRID_SIZE}."
                )),
            },
        }
    }
    match presenter.take_error() {
        Some(e) => Err(e).context("failed to write to stdout"),
        None => Ok(()),
    }
}
