//! LINE reply API client.
//!
//! The client is cheap to clone and shared across requests.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use super::types::ReplyRequest;

/// LINE rejects text messages longer than this many characters.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("reply request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reply API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Sends one text message in reply to an inbound event.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), SendError>;
}

/// Reply API client bound to one channel access token.
#[derive(Clone)]
pub struct LineClient {
    inner: Arc<LineClientInner>,
}

struct LineClientInner {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl LineClient {
    /// Create a client for the Messaging API at `api_base`.
    pub fn new(api_base: &str, access_token: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create LINE HTTP client")?;

        Ok(Self {
            inner: Arc::new(LineClientInner {
                client,
                endpoint: format!("{}/v2/bot/message/reply", api_base.trim_end_matches('/')),
                access_token,
            }),
        })
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), SendError> {
        let text = truncate_text(text, MAX_TEXT_CHARS);
        let request = ReplyRequest::text(reply_token, text);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status_code = status.as_u16(), body = %body, "line_reply_rejected");
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(status_code = status.as_u16(), text_length = text.len(), "line_reply_sent");
        Ok(())
    }
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
