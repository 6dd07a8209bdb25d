use serde::{Deserialize, Serialize};

use charlie_core::types::{InboundEvent, OutboundReply, DEFAULT_CONVERSATION};

/// Activity type for ordinary chat messages. Everything else is an "event".
pub const MESSAGE_TYPE: &str = "message";

/// Bot Framework style activity, the unit exchanged with transports.
///
/// Wire: `{ "type": "message", "text": "utc", "conversation": { "id": "c1" }, ... }`
///
/// Only the fields the bot reads or echoes back are modelled; unknown fields
/// are ignored on the way in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Activity {
    /// Plain message activity, mostly useful for local transports and tests.
    pub fn message(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            activity_type: MESSAGE_TYPE.to_string(),
            text: Some(text.into()),
            conversation: Some(ConversationAccount {
                id: conversation_id.into(),
            }),
            ..Default::default()
        }
    }

    pub fn is_message(&self) -> bool {
        self.activity_type.eq_ignore_ascii_case(MESSAGE_TYPE)
    }

    pub fn conversation_id(&self) -> &str {
        self.conversation
            .as_ref()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_CONVERSATION)
    }

    /// Convert to the transport-neutral event the interpreter consumes.
    ///
    /// A message without text becomes an empty message; any other type keeps
    /// its label verbatim.
    pub fn to_event(&self) -> InboundEvent {
        let conversation_id = self.conversation_id().to_string();
        if self.is_message() {
            InboundEvent::message(conversation_id, self.text.clone().unwrap_or_default())
        } else {
            InboundEvent::other(conversation_id, self.activity_type.clone())
        }
    }

    /// Build the outbound message activity answering `self`.
    ///
    /// Sender and recipient swap places; conversation and channel are kept.
    pub fn reply_with(&self, reply: &OutboundReply) -> Activity {
        Activity {
            activity_type: MESSAGE_TYPE.to_string(),
            id: Some(uuid::Uuid::new_v4().to_string()),
            text: Some(reply.text.clone()),
            conversation: self.conversation.clone(),
            from: self.recipient.clone(),
            recipient: self.from.clone(),
            channel_id: self.channel_id.clone(),
            service_url: self.service_url.clone(),
            reply_to_id: self.id.clone(),
        }
    }
}
