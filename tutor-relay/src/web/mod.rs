//! Web server module for the LINE webhook.
//!
//! - `POST /callback`: signature-verified webhook, answered synchronously
//! - `GET /health`: liveness probe

pub mod handlers;
pub mod ingress;
pub mod signature;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, line_callback, AppState, HealthResponse};
pub use ingress::{parse_events, IngressError};
pub use signature::{compute_signature, verify_line_signature, SIGNATURE_HEADER};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/callback", post(line_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
