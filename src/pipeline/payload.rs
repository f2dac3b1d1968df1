//! Schema-less webhook payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// An opaque JSON document received on the webhook endpoint.
///
/// Any JSON object is accepted. Interpreting its fields is left to whichever
/// collaborator knows the provider's event schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookPayload(Map<String, Value>);

impl WebhookPayload {
    /// Decode a payload from raw request bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for WebhookPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for WebhookPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact JSON, one line per log record.
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

/// Failure turning a request body into a [`WebhookPayload`].
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body could not be read from the connection.
    #[error("{0}")]
    Read(#[from] axum::Error),

    /// The body is not a JSON object.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_any_object() {
        let payload = WebhookPayload::from_slice(
            br#"{"action":"published","release":{"tag_name":"v1.2.0","assets":[]}}"#,
        )
        .unwrap();

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("action"), Some(&json!("published")));
        assert_eq!(payload.get("release").unwrap()["tag_name"], json!("v1.2.0"));
    }

    #[test]
    fn empty_object_is_valid() {
        let payload = WebhookPayload::from_slice(b"{}").unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn rejects_non_objects() {
        assert!(WebhookPayload::from_slice(b"not-json").is_err());
        assert!(WebhookPayload::from_slice(b"[1, 2]").is_err());
        assert!(WebhookPayload::from_slice(b"").is_err());
    }

    #[test]
    fn displays_as_compact_json() {
        let payload = WebhookPayload::from_slice(br#"{ "zen": "Keep it logically awesome." }"#)
            .unwrap();
        assert_eq!(payload.to_string(), r#"{"zen":"Keep it logically awesome."}"#);
    }
}
