//! Activity endpoint, POST /api/messages
//!
//! Request:  a Bot Framework style activity, e.g. `{"type":"message","text":"utc"}`
//! Response: the reply activity (`{"type":"message","text":"Current time UTC=..."}`)
//! Error:    `{"error": "..."}` with status 500 when the turn failed

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use charlie_protocol::Activity;

use crate::app::AppState;

#[derive(Serialize)]
pub struct TurnFailure {
    pub error: String,
}

/// POST /api/messages: run one turn and answer with the reply activity.
pub async fn messages_handler(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> Result<Json<Activity>, (StatusCode, Json<TurnFailure>)> {
    let event = activity.to_event();

    match state.interpreter.interpret(&event).await {
        Ok(reply) => {
            let turn = state.record_turn();
            debug!(turn, conversation = %event.conversation_id, "reply ready");
            Ok(Json(activity.reply_with(&reply)))
        }
        Err(e) => {
            warn!(error = %e, conversation = %event.conversation_id, "turn failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TurnFailure {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
