pub mod db;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::StateError;
pub use memory::MemoryState;
pub use sqlite::SqliteState;
pub use store::ConversationState;
pub use types::ConversationRecord;
