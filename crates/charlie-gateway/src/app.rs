use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use charlie_bot::TurnInterpreter;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub interpreter: TurnInterpreter,
    /// Activities answered since startup.
    pub turns: AtomicU64,
}

impl AppState {
    pub fn new(interpreter: TurnInterpreter) -> Self {
        Self {
            interpreter,
            turns: AtomicU64::new(0),
        }
    }

    pub fn record_turn(&self) -> u64 {
        self.turns.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/api/messages", post(crate::http::messages::messages_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
