use serde::{Deserialize, Serialize};

/// Bookkeeping kept per conversation. The bot never reads it back while
/// answering; it only asks the store to record that a turn happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation_id: String,
    /// Number of message turns flushed so far.
    pub turn_count: u64,
    /// RFC3339 timestamp of the first flush.
    pub created_at: String,
    /// RFC3339 timestamp of the last flush.
    pub updated_at: String,
}

impl ConversationRecord {
    pub(crate) fn first_turn(conversation_id: &str, now: String) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            turn_count: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
