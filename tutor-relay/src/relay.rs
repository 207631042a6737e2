//! Per-event relay: generate, format, reply.
//!
//! Every inbound text event gets exactly one reply attempt. Send failures are
//! logged and dropped; LINE reply tokens are single-use so there is nothing
//! to retry with.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::format::format_reply;
use crate::line::{InboundEvent, ReplySender};
use crate::tutor::{ResponseGenerator, FALLBACK_REPLY};

/// Outcome counts for one webhook delivery.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub sent: usize,
    pub failed: usize,
}

pub struct Relay {
    generator: ResponseGenerator,
    sender: Arc<dyn ReplySender>,
}

impl Relay {
    pub fn new(generator: ResponseGenerator, sender: Arc<dyn ReplySender>) -> Self {
        Self { generator, sender }
    }

    /// Handle the events of one delivery in order.
    pub async fn handle_events(&self, events: &[InboundEvent]) -> RelaySummary {
        let mut summary = RelaySummary::default();

        for event in events {
            if self.handle_event(event).await {
                summary.sent += 1;
            } else {
                summary.failed += 1;
            }
        }

        info!(sent = summary.sent, failed = summary.failed, "relay_delivery_complete");
        summary
    }

    /// Answer one event. Returns whether the reply API accepted the message.
    pub async fn handle_event(&self, event: &InboundEvent) -> bool {
        info!(
            conversation_id = %event.source_conversation_id,
            text_length = event.raw_text.len(),
            "relay_event_start"
        );

        let reply = self.generator.generate(&event.raw_text).await;

        let mut formatted = format_reply(&reply);
        if formatted.is_empty() {
            // LINE refuses empty text messages
            formatted = FALLBACK_REPLY.to_string();
        }

        debug!(reply = ?formatted, "relay_reply_formatted");

        match self.sender.reply_text(&event.reply_token, &formatted).await {
            Ok(()) => {
                info!(
                    conversation_id = %event.source_conversation_id,
                    reply_length = formatted.len(),
                    "relay_event_replied"
                );
                true
            }
            Err(e) => {
                error!(
                    conversation_id = %event.source_conversation_id,
                    error = %e,
                    "relay_reply_failed"
                );
                false
            }
        }
    }
}
