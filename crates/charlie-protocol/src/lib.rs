pub mod activity;

pub use activity::{Activity, ChannelAccount, ConversationAccount, MESSAGE_TYPE};
