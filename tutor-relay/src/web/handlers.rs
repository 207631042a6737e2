//! Webhook endpoint handlers.
//!
//! The callback handler verifies the signature, answers every text event
//! synchronously and only then acknowledges the delivery.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::relay::Relay;
use crate::web::ingress::{parse_events, IngressError};
use crate::web::signature::SIGNATURE_HEADER;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<str>,
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(channel_secret: impl Into<Arc<str>>, relay: Relay) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            relay: Arc::new(relay),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// LINE Webhook
// =============================================================================

/// LINE webhook endpoint.
///
/// This endpoint:
/// 1. Rejects deliveries without a valid `X-Line-Signature` (400)
/// 2. Rejects authentic bodies that are not webhook JSON (400)
/// 3. Replies to each text message, then returns 200 `OK`
pub async fn line_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    info!(body_length = body.len(), "line_webhook_received");
    debug!(body = %String::from_utf8_lossy(&body), "line_webhook_body");

    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!("line_signature_header_missing");
        return (StatusCode::BAD_REQUEST, "missing signature");
    };

    let events = match parse_events(&body, signature, &state.channel_secret) {
        Ok(events) => events,
        // verify_line_signature already logged the reason
        Err(IngressError::Authentication) => {
            return (StatusCode::BAD_REQUEST, "invalid signature");
        }
        Err(e @ IngressError::Parse(_)) => {
            warn!(error = %e, "line_webhook_parse_failed");
            return (StatusCode::BAD_REQUEST, "invalid payload");
        }
    };

    state.relay.handle_events(&events).await;

    (StatusCode::OK, "OK")
}
