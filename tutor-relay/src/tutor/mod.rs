//! Tutor response generation.
//!
//! ## Flow
//!
//! ```text
//! user text → build_prompt() → TextGenerator → parse_model_reply() → reply text
//! ```
//!
//! Every failure along the way collapses into [`FALLBACK_REPLY`].

pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod reply;

use async_trait::async_trait;

pub use error::GenerateError;
pub use gemini::GeminiClient;
pub use generator::{ResponseGenerator, FALLBACK_REPLY};
pub use prompt::{build_prompt, PromptRequest, TUTOR_PROMPT_TEMPLATE};
pub use reply::{parse_model_reply, strip_fence, ModelReply, ReplyParseError};

/// A generative-text backend.
///
/// Returns the raw text of the first candidate; interpreting it is left to
/// [`parse_model_reply`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &PromptRequest) -> Result<String, GenerateError>;
}
