//! Scenario tests for guess handling against a small country table.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use country_grid::catalog::{region, threshold};
use country_grid::dataset::CountryTable;
use country_grid::evaluator::evaluate;
use country_grid::sampler::sample_conditions;
use country_grid::session::{CellState, GridSession, GuessOutcome};
use country_grid::types::{AttributeKind, ConditionSet, CountryRecord};

const COUNTRIES: &str = r#"[
    {"name": "france", "iso2": "FR", "region": "Europe", "population": 67000000,
     "tourists": 89000, "gdp_per_capita": 40000, "co2_emissions": 300000.5},
    {"name": "X", "region": "Europe", "population": 20000},
    {"name": "Lowland", "region": "asia", "population": "70000"},
    {"name": "Brazil", "iso2": "BR", "region": "South America", "population": "214000000"}
]"#;

fn table() -> Arc<CountryTable> {
    Arc::new(CountryTable::from_json_slice(COUNTRIES.as_bytes()).unwrap())
}

/// Row 0: population > 10000, column 0: region = Europe, the rest arbitrary.
fn europe_grid() -> ConditionSet {
    ConditionSet {
        rows: [
            threshold(AttributeKind::Population, 10000),
            threshold(AttributeKind::Tourists, 50000),
            threshold(AttributeKind::GdpPerCapita, 30000),
        ],
        columns: [
            region("Europe"),
            region("South America"),
            threshold(AttributeKind::Co2Emissions, 5000),
        ],
    }
}

// ── Evaluator scenarios ─────────────────────────────────────────────

#[test]
fn population_threshold_round_trip() {
    let rec = CountryRecord::new("P", "Asia").with_number(AttributeKind::Population, 70000.0);
    assert!(evaluate(&rec, &threshold(AttributeKind::Population, 60000)));
    assert!(!evaluate(&rec, &threshold(AttributeKind::Population, 80000)));
}

#[test]
fn region_case_differs_is_false() {
    let t = table();
    let lowland = t.find("Lowland").unwrap();
    assert!(!evaluate(lowland, &region("Asia")));
}

#[test]
fn numeric_string_attribute_counts() {
    let t = table();
    let lowland = t.find("lowland").unwrap();
    assert!(evaluate(lowland, &threshold(AttributeKind::Population, 60000)));
}

// ── Session scenarios ───────────────────────────────────────────────

#[test]
fn name_lookup_is_case_insensitive() {
    let mut session = GridSession::new(table(), europe_grid());
    let outcome = session.submit_guess(0, 0, "France").unwrap();
    match outcome {
        GuessOutcome::Accepted(rec) => {
            assert_eq!(rec.name, "france");
            assert_eq!(rec.code.as_deref(), Some("FR"));
        }
        other => panic!("expected Accepted, got {other:?}"),
    }
    assert_eq!(session.cell(0, 0).unwrap(), &CellState::Filled("france".to_string()));
}

#[test]
fn unknown_country_leaves_cell_empty() {
    let mut session = GridSession::new(table(), europe_grid());
    assert_eq!(session.submit_guess(1, 2, "Atlantis").unwrap(), GuessOutcome::UnknownCountry);
    assert_eq!(session.cell(1, 2).unwrap(), &CellState::Empty);
    assert_eq!(session.filled_count(), 0);
}

#[test]
fn end_to_end_accept_then_no_change() {
    let mut session = GridSession::new(table(), europe_grid());

    let first = session.submit_guess(0, 0, "X").unwrap();
    assert!(matches!(first, GuessOutcome::Accepted(ref r) if r.name == "X"));
    let cells_after_accept = session.cells().clone();

    let second = session.submit_guess(0, 0, "X").unwrap();
    assert_eq!(second, GuessOutcome::AlreadyFilled);
    assert_eq!(session.cells(), &cells_after_accept);
    assert_eq!(session.filled_count(), 1);
}

#[test]
fn wrong_guess_is_rejected_and_retryable() {
    let mut session = GridSession::new(table(), europe_grid());
    assert_eq!(session.submit_guess(0, 0, "Brazil").unwrap(), GuessOutcome::Rejected);
    assert_eq!(session.cell(0, 0).unwrap(), &CellState::Empty);
    assert!(matches!(
        session.submit_guess(0, 1, "Brazil").unwrap(),
        GuessOutcome::Accepted(_)
    ));
}

#[test]
fn fractional_co2_accepted() {
    let mut session = GridSession::new(table(), europe_grid());
    // row 2: gdp > 30000, column 2: co2 > 5000
    assert!(matches!(
        session.submit_guess(2, 2, "FRANCE").unwrap(),
        GuessOutcome::Accepted(_)
    ));
}

#[test]
fn sampled_session_starts_empty() {
    let conditions = sample_conditions(&mut SmallRng::seed_from_u64(2024));
    let session = GridSession::new(table(), conditions.clone());
    assert_eq!(session.conditions(), &conditions);
    assert!(session.cells().iter().flatten().all(|c| *c == CellState::Empty));
    assert!(!session.is_complete());
}

#[test]
fn demo_dataset_loads_and_plays() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/sample_countries.json");
    let table = Arc::new(CountryTable::load(path).unwrap());
    assert_eq!(table.len(), 15);
    assert_eq!(table.find("new zealand").unwrap().code.as_deref(), Some("NZ"));

    let mut session = GridSession::new(table, europe_grid());
    // row 1: tourists > 50000, column 0: region = Europe
    assert!(matches!(session.submit_guess(1, 0, "france").unwrap(), GuessOutcome::Accepted(_)));
    assert_eq!(session.submit_guess(1, 1, "Norway").unwrap(), GuessOutcome::Rejected);
}
