//! Body for responses that carry no resource.

use axum::http::StatusCode;
use serde::Serialize;

/// `{ "message": ..., "status": ... }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub status: u16,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}
