use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::error::{Result, StateError};
use crate::store::ConversationState;
use crate::types::ConversationRecord;

/// SQLite-backed state store.
///
/// Wraps a single connection in a `Mutex`; flushes are short single-row
/// upserts so contention stays low.
pub struct SqliteState {
    db: Mutex<Connection>,
}

impl SqliteState {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Open `path`, run migrations and wrap the connection.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        crate::db::init_db(&conn)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| StateError::Unavailable("sqlite connection lock poisoned".to_string()))
    }

    /// Retrieve a conversation record, returning `None` if it was never flushed.
    #[instrument(skip(self))]
    pub fn get(&self, conversation_id: &str) -> Result<Option<ConversationRecord>> {
        let db = self.lock()?;
        match db.query_row(
            "SELECT conversation_id, turn_count, created_at, updated_at
             FROM conversations WHERE conversation_id = ?1",
            rusqlite::params![conversation_id],
            row_to_record,
        ) {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StateError::Database(e)),
        }
    }
}

impl ConversationState for SqliteState {
    fn name(&self) -> &str {
        "sqlite"
    }

    #[instrument(skip(self))]
    fn flush(&self, conversation_id: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.lock()?;
        db.execute(
            "INSERT INTO conversations (conversation_id, turn_count, created_at, updated_at)
             VALUES (?1, 1, ?2, ?2)
             ON CONFLICT(conversation_id) DO UPDATE
             SET turn_count = turn_count + 1,
                 updated_at = excluded.updated_at",
            rusqlite::params![conversation_id, now],
        )?;
        debug!("conversation state flushed");
        Ok(())
    }
}

/// Map a SQLite row to a `ConversationRecord`.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConversationRecord> {
    Ok(ConversationRecord {
        conversation_id: row.get(0)?,
        turn_count: row.get::<_, i64>(1)? as u64,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
