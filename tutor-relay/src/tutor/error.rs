//! Generation error types

use std::time::Duration;

use thiserror::Error;

use super::reply::ReplyParseError;

/// Why a generation attempt produced no usable reply.
///
/// None of these reach the user; the generator logs them and answers with
/// the fallback text instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generative backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generative backend returned no candidates")]
    EmptyCandidates,

    #[error("first candidate has no text part")]
    EmptyParts,

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Reply(#[from] ReplyParseError),
}
