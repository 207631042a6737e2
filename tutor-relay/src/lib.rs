//! LineTutor - LINE chat relay for an English-tutoring Gemini assistant.
//!
//! ## Architecture
//!
//! ```text
//! LINE webhook → signature check → text events → Gemini → format → LINE reply
//! ```
//!
//! Nothing is stored between deliveries; each webhook is handled on its own.

pub mod config;
pub mod format;
pub mod line;
pub mod relay;
pub mod tutor;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use format::format_reply;
pub use line::{InboundEvent, LineClient, ReplySender};
pub use relay::Relay;
pub use tutor::{GeminiClient, ResponseGenerator, TextGenerator, FALLBACK_REPLY};
pub use web::AppState;
