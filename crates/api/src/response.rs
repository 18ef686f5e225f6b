//! Shared response envelope types for API handlers.
//!
//! Records are returned as bare JSON. Operations that report an outcome use
//! a `{ "message": ... }` envelope, optionally carrying the affected record
//! under a named key.

use serde::Serialize;

/// `{ "message": "..." }` body for deletes and other record-less outcomes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
