pub mod config;
pub mod error;
pub mod types;

pub use config::CharlieConfig;
pub use error::CharlieError;
pub use types::{EventKind, InboundEvent, OutboundReply};
