use crate::error::Result;

/// Externally owned conversation state, injected into the turn interpreter.
///
/// The interpreter calls [`flush`](ConversationState::flush) exactly once per
/// message turn, before it replies. Implementations synchronise internally so
/// a single instance can be shared behind an `Arc` by concurrent turns.
pub trait ConversationState: Send + Sync {
    /// Short backend label for logs and health output (e.g. `"sqlite"`).
    fn name(&self) -> &str;

    /// Persist pending state for `conversation_id` and record the turn.
    fn flush(&self, conversation_id: &str) -> Result<()>;
}
