use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversation id used when the transport does not supply one.
pub const DEFAULT_CONVERSATION: &str = "default";

/// What an inbound activity carries.
///
/// Text is only present on messages and the type label only on everything
/// else, so the two live in separate variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Message { text: String },
    Other { label: String },
}

/// One user turn as delivered by a transport. Consumed once by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Key for the externally owned conversation state.
    pub conversation_id: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn message(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: EventKind::Message { text: text.into() },
        }
    }

    pub fn other(conversation_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: EventKind::Other {
                label: label.into(),
            },
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind, EventKind::Message { .. })
    }
}

/// The single reply produced for an [`InboundEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    pub text: String,
}

impl OutboundReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for OutboundReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
