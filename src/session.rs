//! Grid session: the live 3×3 board for one game.
//!
//! Per-cell state machine:
//!
//! ```text
//! Empty --accepted guess--> Filled   (terminal)
//! Empty --rejected guess--> Empty    (re-guessable)
//! Filled --any guess------> Filled   (AlreadyFilled, no transition)
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::constants::GRID_SIZE;
use crate::dataset::CountryTable;
use crate::error::{GridError, Result};
use crate::evaluator::satisfies_cell;
use crate::types::{ConditionSet, CountryRecord, Predicate};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "country", rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Empty,
    Filled(String),
}

impl CellState {
    pub fn is_filled(&self) -> bool {
        matches!(self, CellState::Filled(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// The country satisfies both predicates; the cell is now filled.
    Accepted(CountryRecord),
    /// Known country, but at least one predicate fails. Cell stays empty.
    Rejected,
    /// No record matches the guessed name. Cell unchanged.
    UnknownCountry,
    /// The cell was already filled; nothing changed.
    AlreadyFilled,
}

impl GuessOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuessOutcome::Accepted(_) => "accepted",
            GuessOutcome::Rejected => "rejected",
            GuessOutcome::UnknownCountry => "unknown_country",
            GuessOutcome::AlreadyFilled => "already_filled",
        }
    }
}

pub struct GridSession {
    table: Arc<CountryTable>,
    conditions: ConditionSet,
    cells: [[CellState; GRID_SIZE]; GRID_SIZE],
}

impl GridSession {
    /// Start a game with the given predicates; every cell starts empty.
    pub fn new(table: Arc<CountryTable>, conditions: ConditionSet) -> Self {
        Self {
            table,
            conditions,
            cells: Default::default(),
        }
    }

    pub fn rows(&self) -> &[Predicate; GRID_SIZE] {
        &self.conditions.rows
    }

    pub fn columns(&self) -> &[Predicate; GRID_SIZE] {
        &self.conditions.columns
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn table(&self) -> &CountryTable {
        &self.table
    }

    pub fn cells(&self) -> &[[CellState; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&CellState> {
        check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_filled()).count()
    }

    /// All cells filled. Reporting only; the session keeps no win state.
    pub fn is_complete(&self) -> bool {
        self.filled_count() == GRID_SIZE * GRID_SIZE
    }

    /// Submit `name` for cell (`row`, `col`).
    ///
    /// Errors only when the cell is outside the grid.
    pub fn submit_guess(&mut self, row: usize, col: usize, name: &str) -> Result<GuessOutcome> {
        check_bounds(row, col)?;

        if self.cells[row][col].is_filled() {
            debug!(row, col, guess = name, "cell already filled");
            return Ok(GuessOutcome::AlreadyFilled);
        }

        let Some(record) = self.table.find(name) else {
            debug!(row, col, guess = name, "unknown country");
            return Ok(GuessOutcome::UnknownCountry);
        };

        let row_pred = &self.conditions.rows[row];
        let col_pred = &self.conditions.columns[col];
        if satisfies_cell(record, row_pred, col_pred) {
            debug!(row, col, country = %record.name, "guess accepted");
            self.cells[row][col] = CellState::Filled(record.name.clone());
            Ok(GuessOutcome::Accepted(record.clone()))
        } else {
            debug!(row, col, country = %record.name, "guess rejected");
            Ok(GuessOutcome::Rejected)
        }
    }
}

fn check_bounds(row: usize, col: usize) -> Result<()> {
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return Err(GridError::CellOutOfBounds {
            row,
            col,
            size: GRID_SIZE,
        });
    }
    Ok(())
}
