//! Where decoded payloads are recorded.

use std::sync::{Arc, Mutex};

use crate::pipeline::payload::WebhookPayload;

/// Receives every successfully decoded payload.
pub trait PayloadSink: Send + Sync + 'static {
    fn record(&self, payload: &WebhookPayload);
}

/// Emits each payload as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl PayloadSink for TracingSink {
    fn record(&self, payload: &WebhookPayload) {
        tracing::info!(fields = payload.len(), payload = %payload, "New payload received");
    }
}

/// Keeps payloads in memory so they can be inspected later.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<WebhookPayload>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<WebhookPayload> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PayloadSink for MemorySink {
    fn record(&self, payload: &WebhookPayload) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(payload.clone());
    }
}
