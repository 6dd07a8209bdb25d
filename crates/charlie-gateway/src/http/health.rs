use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::{atomic::Ordering, Arc};

use crate::app::AppState;

/// GET /health: liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "commit": env!("CHARLIE_GIT_SHA"),
        "state": state.interpreter.state().name(),
        "turns": state.turns.load(Ordering::Relaxed),
    }))
}
