//! # Country Grid — attribute-predicate puzzle engine
//!
//! A session shows a 3×3 grid. Each row and each column carries a predicate over
//! country attributes ("Population over 41234", "Region in Europe"). A cell is
//! filled by naming a country that satisfies both its row and its column predicate.
//!
//! ## Pipeline
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | Dataset | [`dataset`] | Load the country table (JSON) and index names case-insensitively |
//! | Catalog | [`catalog`] | Five static predicate templates with their value samplers |
//! | Sampling | [`sampler`] | Draw 3 row + 3 column predicates with kind de-duplication |
//! | Evaluation | [`evaluator`] | Decide whether one record satisfies one predicate |
//! | Session | [`session`] | Cell state machine, guess submission, outcomes |
//! | Presentation | [`presentation`], [`server`] | Text rendering, presenter trait, HTTP API |
//!
//! The offline region clean-up that produces canonical region names lives in
//! [`region`] and runs from the `country-grid-simplify-regions` binary.
//!
//! ## Randomness
//!
//! Nothing in the library reaches for ambient randomness. Every sampling entry
//! point takes `&mut impl Rng`, so tests drive it with `SmallRng::seed_from_u64`.

pub mod catalog;
pub mod constants;
pub mod dataset;
pub mod env_config;
pub mod error;
pub mod evaluator;
pub mod presentation;
pub mod region;
pub mod sampler;
pub mod server;
pub mod session;
pub mod types;

pub use error::{GridError, Result};
