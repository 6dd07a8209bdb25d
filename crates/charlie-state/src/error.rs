use thiserror::Error;

/// Errors raised while persisting conversation state.
#[derive(Debug, Error)]
pub enum StateError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The store cannot be reached (poisoned lock, closed handle, ...).
    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StateError>;
