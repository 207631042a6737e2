//! Google Gemini `generateContent` client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{GenerateError, PromptRequest, TextGenerator};

/// Longest error body kept from a failed backend call.
const ERROR_BODY_PREVIEW: usize = 500;

/// Gemini REST client for a single model.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for `model` under `api_base`.
    ///
    /// `model` may carry the `models/` prefix used by Google's SDKs.
    pub fn new(api_base: &str, model: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create Gemini HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint_for(api_base, model),
            api_key,
        })
    }
}

fn endpoint_for(api_base: &str, model: &str) -> String {
    let model = model.trim().trim_start_matches("models/");
    format!(
        "{}/v1beta/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        model
    )
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &PromptRequest) -> Result<String, GenerateError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.as_str(),
                }],
            }],
        };

        info!(
            endpoint = %self.endpoint,
            prompt_length = prompt.as_str().len(),
            "gemini_request_starting"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let preview: String = text.chars().take(ERROR_BODY_PREVIEW).collect();
            warn!(status_code = status.as_u16(), body = %preview, "gemini_request_rejected");
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!(candidates = parsed.candidates.len(), "gemini_response_received");

        extract_text(parsed)
    }
}

/// Take the trimmed text of the first part of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerateError::EmptyCandidates)?;

    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(GenerateError::EmptyParts)?;

    Ok(text.trim().to_string())
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
