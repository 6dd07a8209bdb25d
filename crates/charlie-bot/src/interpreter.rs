//! The turn interpreter: one inbound event in, exactly one reply out.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use charlie_core::types::{EventKind, InboundEvent, OutboundReply};
use charlie_state::ConversationState;

use crate::codec;
use crate::commands::{classify, Classified, Command};
use crate::error::TurnError;
use crate::weather::WeatherLookup;

/// Line break appended to every message reply.
const LINE_BREAK: &str = "\n";
/// Timestamp layout for the `utc` and `time` commands, e.g. `3/7/2026 4:05:09 PM`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

/// Classifies message text and produces the reply.
///
/// Holds no per-turn state. The conversation-state store and the weather
/// lookup are injected and owned by the caller.
pub struct TurnInterpreter {
    state: Arc<dyn ConversationState>,
    weather: Arc<dyn WeatherLookup>,
}

impl TurnInterpreter {
    pub fn new(state: Arc<dyn ConversationState>, weather: Arc<dyn WeatherLookup>) -> Self {
        Self { state, weather }
    }

    pub fn state(&self) -> &dyn ConversationState {
        self.state.as_ref()
    }

    /// Process one turn.
    ///
    /// Non-message events are acknowledged without touching state. Message
    /// events flush the conversation state first; a failed flush is the only
    /// way this returns an error.
    #[instrument(skip(self, event), fields(conversation = %event.conversation_id))]
    pub async fn interpret(&self, event: &InboundEvent) -> Result<OutboundReply, TurnError> {
        let text = match &event.kind {
            EventKind::Other { label } => {
                debug!(label = %label, "non-message activity");
                return Ok(OutboundReply::new(format!("{label} event detected")));
            }
            EventKind::Message { text } => text,
        };

        info!("turn start");
        self.state.flush(&event.conversation_id)?;

        let body = match classify(text) {
            Some(classified) => {
                debug!(command = ?classified.command, "command matched");
                self.run(classified).await
            }
            None => format!("What does , {text} mean ? "),
        };

        Ok(OutboundReply::new(format!("{body}{LINE_BREAK}")))
    }

    async fn run(&self, classified: Classified<'_>) -> String {
        let arg = classified.argument;
        match classified.command {
            Command::UtcTime => format!(
                "Current time UTC={}",
                chrono::Utc::now().format(TIMESTAMP_FORMAT)
            ),
            Command::LocalTime => format!(
                "Current time={}",
                chrono::Local::now().format(TIMESTAMP_FORMAT)
            ),
            Command::Base64Encode => format!("base 64 encoded={}", codec::encode_base64(arg)),
            Command::Base64Decode => match codec::decode_base64(arg) {
                Ok(decoded) => format!("your base64 decode={decoded}"),
                Err(e) => {
                    warn!(error = ?e, "base64 decode failed");
                    format!("your base64 decode=<error: {e}>")
                }
            },
            Command::Guid => format!("random GUID={}", uuid::Uuid::new_v4()),
            Command::Weather => {
                format!("Current weather in {}", self.weather.lookup(arg).await)
            }
        }
    }
}
