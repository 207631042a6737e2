//! LINE webhook and reply API wire types.
//!
//! Only the parts of the webhook body the relay reads are modelled. Unknown
//! event kinds, message kinds and source kinds deserialize into catch-all
//! variants so new LINE features never break parsing.

use serde::{Deserialize, Serialize};

// =============================================================================
// Webhook (inbound)
// =============================================================================

/// Body of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID that received the events
    #[serde(default)]
    pub destination: String,
    /// Events in delivery order; empty for the console's verify request
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEvent {
    #[serde(rename = "message")]
    Message(MessageEvent),
    /// follow, unfollow, postback, join, ...
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    /// Absent for events delivered in standby mode
    #[serde(default, rename = "replyToken")]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    pub message: MessageContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MessageContent {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        id: String,
        text: String,
    },
    /// image, sticker, location, ...
    #[serde(other)]
    Other,
}

/// Where an event came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum EventSource {
    #[serde(rename = "user")]
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    #[serde(rename = "group")]
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
        #[serde(default, rename = "userId")]
        user_id: Option<String>,
    },
    #[serde(rename = "room")]
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(default, rename = "userId")]
        user_id: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl EventSource {
    /// ID of the conversation a reply lands in.
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            EventSource::User { user_id } => Some(user_id),
            EventSource::Group { group_id, .. } => Some(group_id),
            EventSource::Room { room_id, .. } => Some(room_id),
            EventSource::Unknown => None,
        }
    }
}

/// A text message that needs exactly one reply.
///
/// Request-scoped; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// User, group or room ID; empty when LINE sent an unknown source kind
    pub source_conversation_id: String,
    pub raw_text: String,
    pub reply_token: String,
}

impl MessageEvent {
    /// Convert into an [`InboundEvent`] when this is a repliable text message.
    pub fn into_inbound(self) -> Option<InboundEvent> {
        let MessageContent::Text { text, .. } = self.message else {
            return None;
        };
        let reply_token = self.reply_token?;

        let source_conversation_id = self
            .source
            .as_ref()
            .and_then(EventSource::conversation_id)
            .unwrap_or_default()
            .to_string();

        Some(InboundEvent {
            source_conversation_id,
            raw_text: text,
            reply_token,
        })
    }
}

// =============================================================================
// Reply API (outbound)
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyRequest {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub messages: Vec<OutboundMessage>,
}

impl ReplyRequest {
    /// A reply carrying a single text message.
    pub fn text(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages: vec![OutboundMessage::Text { text: text.into() }],
        }
    }
}
