//! Stub backends for tests.
//!
//! These let the generator, relay and HTTP handlers run without network
//! access. The HTTP clients are pointed at a loopback axum server instead.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode, Uri},
    Router,
};
use tokio::net::TcpListener;

use crate::line::{ReplySender, SendError};
use crate::tutor::{GenerateError, PromptRequest, TextGenerator};

// ============================================================================
// Stub generator
// ============================================================================

/// Generator that answers with queued results and records prompts.
#[derive(Default)]
pub struct StubGenerator {
    responses: Mutex<VecDeque<Result<String, GenerateError>>>,
    delay: Option<Duration>,
    pub prompts: Mutex<Vec<PromptRequest>>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn queue_error(&self, error: GenerateError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, prompt: &PromptRequest) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerateError::EmptyCandidates))
    }
}

// ============================================================================
// Recording sender
// ============================================================================

/// Reply sender that records `(reply_token, text)` pairs.
#[derive(Default)]
pub struct RecordingSender {
    fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender whose every call is recorded and then rejected.
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));

        if self.fail {
            return Err(SendError::Status {
                status: 400,
                body: "Invalid reply token".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Loopback API server
// ============================================================================

/// A request captured by [`spawn_stub_api`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Serve `status` + `body` for every request on an ephemeral loopback port.
///
/// Returns the base URL and the log of received requests.
pub async fn spawn_stub_api(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, bytes: Bytes| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(RecordedRequest {
                path: uri.path().to_string(),
                headers,
                body: bytes,
            });
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), recorded)
}
