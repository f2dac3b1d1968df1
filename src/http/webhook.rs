//! Webhook route registration.
//!
//! One path, any method. The body is read in full and decoded as a JSON
//! object; the decoded payload goes to the configured [`PayloadSink`].

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::pipeline::{PayloadError, PayloadSink, WebhookPayload};

/// Path that webhook notifications are delivered to.
pub const WEBHOOK_PATH: &str = "/github/webhook/payload";

/// Build a router with the webhook route registered.
pub fn router(sink: Arc<dyn PayloadSink>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, any(receive_payload))
        .with_state(sink)
}

async fn receive_payload(State(sink): State<Arc<dyn PayloadSink>>, body: Body) -> Response {
    match read_payload(body).await {
        Ok(payload) => {
            sink.record(&payload);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected webhook payload");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn read_payload(body: Body) -> Result<WebhookPayload, PayloadError> {
    let bytes = axum::body::to_bytes(body, usize::MAX).await?;
    Ok(WebhookPayload::from_slice(&bytes)?)
}
