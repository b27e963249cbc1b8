//! Presentation boundary: anything that shows the grid and reports guess
//! outcomes implements [`Presenter`]. The session itself never renders.

use std::io::Write;

use crate::constants::{FLAGS_DIR, GRID_SIZE};
use crate::error::Result;
use crate::session::{CellState, GridSession, GuessOutcome};
use crate::types::CountryRecord;

pub trait Presenter {
    fn show_grid(&mut self, session: &GridSession);
    fn show_outcome(&mut self, row: usize, col: usize, outcome: &GuessOutcome);
}

/// Cell click handler: submit the guess and forward the outcome. The grid is
/// redrawn after an acceptance.
pub fn on_cell_clicked<P: Presenter + ?Sized>(
    session: &mut GridSession,
    presenter: &mut P,
    row: usize,
    col: usize,
    guess: &str,
) -> Result<GuessOutcome> {
    let outcome = session.submit_guess(row, col, guess)?;
    presenter.show_outcome(row, col, &outcome);
    if matches!(outcome, GuessOutcome::Accepted(_)) {
        presenter.show_grid(session);
    }
    Ok(outcome)
}

/// Line-oriented presenter over any writer (stdout for the terminal game).
/// The first write error is kept and later output is skipped; callers check
/// [`TextPresenter::take_error`] and stop.
pub struct TextPresenter<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one free-form line (prompts, status messages).
    pub fn line(&mut self, line: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(line).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn show_grid(&mut self, session: &GridSession) {
        let grid = render_grid(session);
        self.line(format_args!("\n{grid}"));
    }

    fn show_outcome(&mut self, row: usize, col: usize, outcome: &GuessOutcome) {
        let cell = format!("({}, {})", row + 1, col + 1);
        match outcome {
            GuessOutcome::Accepted(record) => match flag_path(record) {
                Some(flag) => self.line(format_args!("{cell}: correct, {} [{flag}]", record.name)),
                None => self.line(format_args!("{cell}: correct, {}", record.name)),
            },
            GuessOutcome::Rejected => self.line(format_args!("{cell}: wrong, try again")),
            GuessOutcome::UnknownCountry => {
                self.line(format_args!("{cell}: country data not found for that name"))
            }
            GuessOutcome::AlreadyFilled => self.line(format_args!("{cell}: already filled")),
        }
    }
}

/// `flags_svg/{iso2}.svg`, if the record has a code.
pub fn flag_path(record: &CountryRecord) -> Option<String> {
    record
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!("{}/{}.svg", FLAGS_DIR, c.to_lowercase()))
}

/// Plain-text table: column headers on top, row headers on the left, filled
/// cells show the country, empty cells show `?`.
pub fn render_grid(session: &GridSession) -> String {
    let row_labels: Vec<String> = session.rows().iter().map(|p| p.label()).collect();
    let col_labels: Vec<String> = session.columns().iter().map(|p| p.label()).collect();

    let row_width = row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut col_widths = [0usize; GRID_SIZE];
    for (c, label) in col_labels.iter().enumerate() {
        col_widths[c] = label.len();
        for r in 0..GRID_SIZE {
            col_widths[c] = col_widths[c].max(cell_text(&session.cells()[r][c]).len());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(row_width));
    for (c, label) in col_labels.iter().enumerate() {
        out.push_str(&format!(" | {:<w$}", label, w = col_widths[c]));
    }
    out.push('\n');

    let rule_len = row_width + col_widths.iter().map(|w| w + 3).sum::<usize>();
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for (r, label) in row_labels.iter().enumerate() {
        out.push_str(&format!("{:<w$}", label, w = row_width));
        for c in 0..GRID_SIZE {
            let text = cell_text(&session.cells()[r][c]);
            out.push_str(&format!(" | {:<w$}", text, w = col_widths[c]));
        }
        out.push('\n');
    }
    out
}

fn cell_text(cell: &CellState) -> &str {
    match cell {
        CellState::Empty => "?",
        CellState::Filled(name) => name,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{region, threshold};
    use crate::dataset::CountryTable;
    use crate::types::{AttributeKind, ConditionSet};

    #[derive(Default)]
    struct Recorder {
        outcomes: Vec<(usize, usize, &'static str)>,
        redraws: usize,
    }

    impl Presenter for Recorder {
        fn show_grid(&mut self, _session: &GridSession) {
            self.redraws += 1;
        }
        fn show_outcome(&mut self, row: usize, col: usize, outcome: &GuessOutcome) {
            self.outcomes.push((row, col, outcome.as_str()));
        }
    }

    fn session() -> GridSession {
        let table = CountryTable::from_records(vec![CountryRecord::new("Chile", "South America")
            .with_code("CL")
            .with_number(AttributeKind::Population, 19_000_000.0)]);
        let p = threshold(AttributeKind::Population, 10000);
        let sa = region("South America");
        GridSession::new(
            Arc::new(table),
            ConditionSet {
                rows: [p.clone(), p.clone(), p.clone()],
                columns: [sa.clone(), sa.clone(), sa],
            },
        )
    }

    #[test]
    fn test_click_forwards_outcomes() {
        let mut s = session();
        let mut rec = Recorder::default();
        on_cell_clicked(&mut s, &mut rec, 1, 1, "chile").unwrap();
        on_cell_clicked(&mut s, &mut rec, 1, 1, "chile").unwrap();
        on_cell_clicked(&mut s, &mut rec, 0, 0, "Peru").unwrap();
        assert_eq!(
            rec.outcomes,
            vec![(1, 1, "accepted"), (1, 1, "already_filled"), (0, 0, "unknown_country")]
        );
        assert_eq!(rec.redraws, 1);
    }

    struct BrokenPipe {
        attempts: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.attempts += 1;
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_text_presenter_writes_lines() {
        let mut s = session();
        let mut p = TextPresenter::new(Vec::new());
        on_cell_clicked(&mut s, &mut p, 0, 0, "Chile").unwrap();
        on_cell_clicked(&mut s, &mut p, 0, 1, "Atlantis").unwrap();
        assert!(p.take_error().is_none());
        let text = String::from_utf8(p.into_inner()).unwrap();
        assert!(text.contains("(1, 1): correct, Chile [flags_svg/cl.svg]"));
        assert!(text.contains("(1, 2): country data not found"));
        assert!(text.contains("Population over 10000"));
    }

    #[test]
    fn test_text_presenter_keeps_first_write_error() {
        let mut s = session();
        let mut p = TextPresenter::new(BrokenPipe { attempts: 0 });
        p.show_grid(&s);
        on_cell_clicked(&mut s, &mut p, 0, 0, "Peru").unwrap();
        on_cell_clicked(&mut s, &mut p, 1, 1, "Chile").unwrap();

        let err = p.take_error().expect("write error recorded");
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        // Output stops after the first failure.
        assert_eq!(p.into_inner().attempts, 1);
    }

    #[test]
    fn test_flag_path() {
        let chile = CountryRecord::new("Chile", "South America").with_code("CL");
        assert_eq!(flag_path(&chile).as_deref(), Some("flags_svg/cl.svg"));
        assert_eq!(flag_path(&CountryRecord::new("X", "Asia")), None);
    }

    #[test]
    fn test_render_shows_headers_and_fills() {
        let mut s = session();
        s.submit_guess(2, 0, "Chile").unwrap();
        let text = render_grid(&s);
        assert!(text.contains("Population over 10000"));
        assert!(text.contains("Region in South America"));
        assert!(text.contains("Chile"));
        assert_eq!(text.matches('?').count(), 8);
    }
}
