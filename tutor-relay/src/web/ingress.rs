//! Signature-verified webhook ingress.
//!
//! Turns a raw delivery into the text events that need a reply. The
//! signature is checked before the body is parsed.

use thiserror::Error;
use tracing::{debug, info};

use crate::line::{InboundEvent, WebhookEvent, WebhookPayload};
use crate::web::signature::verify_line_signature;

#[derive(Debug, Error)]
pub enum IngressError {
    /// The body was not signed with our channel secret.
    #[error("webhook signature does not match")]
    Authentication,

    /// The body was authentic but not a webhook payload.
    #[error("webhook body is not a valid payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Verify and parse a webhook delivery.
///
/// Returns the repliable text messages in delivery order. Other event and
/// message kinds are dropped without error.
pub fn parse_events(
    body: &[u8],
    signature: &str,
    channel_secret: &str,
) -> Result<Vec<InboundEvent>, IngressError> {
    if !verify_line_signature(channel_secret, body, signature) {
        return Err(IngressError::Authentication);
    }

    let payload: WebhookPayload = serde_json::from_slice(body)?;
    let total = payload.events.len();

    let events: Vec<InboundEvent> = payload
        .events
        .into_iter()
        .filter_map(|event| match event {
            WebhookEvent::Message(message) => message.into_inbound(),
            WebhookEvent::Other => None,
        })
        .collect();

    debug!(destination = %payload.destination, "webhook_destination");
    info!(
        total_events = total,
        text_events = events.len(),
        ignored_events = total - events.len(),
        "webhook_events_parsed"
    );

    Ok(events)
}
