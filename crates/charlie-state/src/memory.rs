use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::store::ConversationState;
use crate::types::ConversationRecord;

/// Process-local state store. Lost on restart; the default backend.
#[derive(Default)]
pub struct MemoryState {
    records: DashMap<String, ConversationRecord>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, conversation_id: &str) -> Option<ConversationRecord> {
        self.records.get(conversation_id).map(|r| r.clone())
    }

    /// Number of conversations seen so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ConversationState for MemoryState {
    fn name(&self) -> &str {
        "memory"
    }

    fn flush(&self, conversation_id: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.records
            .entry(conversation_id.to_string())
            .and_modify(|r| {
                r.turn_count += 1;
                r.updated_at = now.clone();
            })
            .or_insert_with(|| ConversationRecord::first_turn(conversation_id, now.clone()));
        debug!(conversation = %conversation_id, "conversation state flushed");
        Ok(())
    }
}
