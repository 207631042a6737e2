//! Tutor reply generation with a fixed fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{build_prompt, parse_model_reply, GenerateError, TextGenerator};

/// Text sent whenever generation fails for any reason.
pub const FALLBACK_REPLY: &str = "抱歉，我暫時無法理解你的問題，但我會一直在你身邊。";

/// Turns user text into a tutor reply.
///
/// [`generate`](Self::generate) is total: backend errors, timeouts and
/// malformed replies are logged and replaced by [`FALLBACK_REPLY`].
pub struct ResponseGenerator {
    backend: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl ResponseGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Produce the reply for `user_text`, or the fallback text.
    pub async fn generate(&self, user_text: &str) -> String {
        match self.try_generate(user_text).await {
            Ok(reply) => {
                info!(reply_length = reply.len(), "generator_reply_ready");
                reply
            }
            Err(e) => {
                warn!(error = %e, "generator_failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn try_generate(&self, user_text: &str) -> Result<String, GenerateError> {
        let prompt = build_prompt(user_text);

        let payload = tokio::time::timeout(self.timeout, self.backend.generate_text(&prompt))
            .await
            .map_err(|_| GenerateError::Timeout(self.timeout))??;

        debug!(payload = %payload, "generator_raw_payload");

        let reply = parse_model_reply(&payload)?;
        Ok(reply.reply)
    }
}
