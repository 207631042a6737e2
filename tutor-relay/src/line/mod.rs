//! LINE Messaging API integration.
//!
//! - Webhook payload types and the request-scoped [`InboundEvent`]
//! - Reply API client behind the [`ReplySender`] trait

pub mod client;
pub mod types;

pub use client::{truncate_text, LineClient, ReplySender, SendError, MAX_TEXT_CHARS};
pub use types::{
    EventSource, InboundEvent, MessageContent, MessageEvent, OutboundMessage, ReplyRequest,
    WebhookEvent, WebhookPayload,
};
