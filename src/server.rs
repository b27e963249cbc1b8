//! Axum HTTP server: the web presentation layer over [`GridSession`].
//!
//! The country table is loaded once and shared read-only. Each game is an
//! independent session keyed by a numeric id; sessions are never reused.
//! At most [`MAX_GAMES`] are kept; creating one more drops the oldest.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/games` | Sample a new grid (optional `{"seed": u64}`) |
//! | GET | `/games/{id}` | Headers and cell states for one game |
//! | POST | `/games/{id}/guess` | Submit `{"row", "col", "country"}` |
//! | DELETE | `/games/{id}` | Drop a finished game |

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::constants::MAX_GAMES;
use crate::dataset::CountryTable;
use crate::error::GridError;
use crate::presentation::flag_path;
use crate::sampler::sample_conditions;
use crate::session::{GridSession, GuessOutcome};
use crate::types::Predicate;

pub struct AppState {
    table: Arc<CountryTable>,
    games: Mutex<BTreeMap<u64, GridSession>>,
    next_id: AtomicU64,
    rng: Mutex<SmallRng>,
}

impl AppState {
    /// `seed` fixes the sequence of grids handed out; `None` seeds from the OS.
    pub fn new(table: Arc<CountryTable>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        Self {
            table,
            games: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            rng: Mutex::new(rng),
        }
    }

    fn games(&self) -> MutexGuard<'_, BTreeMap<u64, GridSession>> {
        self.games.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a new game, evicting the lowest (oldest) ids once [`MAX_GAMES`]
    /// are held.
    fn insert_game(&self, id: u64, session: GridSession) {
        let mut games = self.games();
        while games.len() >= MAX_GAMES {
            match games.pop_first() {
                Some((evicted, _)) => debug!(game = evicted, "evicted oldest game"),
                None => break,
            }
        }
        games.insert(id, session);
    }

    fn game_rng(&self, seed: Option<u64>) -> SmallRng {
        match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut shared = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                SmallRng::seed_from_u64(shared.random())
            }
        }
    }
}

pub type AppStateRef = Arc<AppState>;

pub fn create_router(state: AppStateRef) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/games", post(handle_new_game))
        .route("/games/{id}", get(handle_get_game).delete(handle_delete_game))
        .route("/games/{id}/guess", post(handle_guess))
        .layer(cors)
        .with_state(state)
}

// ── Request/Response types ──────────────────────────────────────────

#[derive(Deserialize, Default)]
struct NewGameRequest {
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct GuessRequest {
    row: usize,
    col: usize,
    country: String,
}

type ApiError = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(json!({ "error": msg })))
}

fn game_not_found(id: u64) -> ApiError {
    error_response(StatusCode::NOT_FOUND, &format!("Game {} not found", id))
}

fn predicate_json(p: &Predicate) -> Value {
    json!({
        "kind": p.kind,
        "comparison": p.comparison,
        "description": p.description,
        "value": p.value,
        "label": p.label(),
    })
}

fn snapshot(id: u64, session: &GridSession) -> Value {
    json!({
        "id": id,
        "rows": session.rows().iter().map(predicate_json).collect::<Vec<_>>(),
        "columns": session.columns().iter().map(predicate_json).collect::<Vec<_>>(),
        "cells": session.cells(),
        "filled": session.filled_count(),
        "complete": session.is_complete(),
    })
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn handle_new_game(
    State(state): State<AppStateRef>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: NewGameRequest = if body.iter().all(u8::is_ascii_whitespace) {
        NewGameRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?
    };

    let mut rng = state.game_rng(req.seed);
    let conditions = sample_conditions(&mut rng);
    let session = GridSession::new(Arc::clone(&state.table), conditions);

    let id = state.next_id.fetch_add(1, Ordering::Relaxed);
    let created = snapshot(id, &session);
    info!(
        game = id,
        rows = ?session.rows().iter().map(|p| p.label()).collect::<Vec<_>>(),
        columns = ?session.columns().iter().map(|p| p.label()).collect::<Vec<_>>(),
        "new game"
    );
    state.insert_game(id, session);
    Ok(Json(created))
}

async fn handle_get_game(
    State(state): State<AppStateRef>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let games = state.games();
    let session = games.get(&id).ok_or_else(|| game_not_found(id))?;
    Ok(Json(snapshot(id, session)))
}

async fn handle_delete_game(
    State(state): State<AppStateRef>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    match state.games().remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(game_not_found(id)),
    }
}

async fn handle_guess(
    State(state): State<AppStateRef>,
    Path(id): Path<u64>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut games = state.games();
    let session = games.get_mut(&id).ok_or_else(|| game_not_found(id))?;

    let outcome = match session.submit_guess(req.row, req.col, &req.country) {
        Ok(o) => o,
        Err(e @ GridError::CellOutOfBounds { .. }) => {
            return Err(error_response(StatusCode::BAD_REQUEST, &e.to_string()))
        }
        Err(e) => {
            return Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
            ))
        }
    };

    let mut result = json!({
        "outcome": outcome.as_str(),
        "game": snapshot(id, session),
    });
    if let GuessOutcome::Accepted(record) = &outcome {
        result["country"] = json!(record);
        if let Some(flag) = flag_path(record) {
            result["flag"] = json!(flag);
        }
    }
    Ok(Json(result))
}
