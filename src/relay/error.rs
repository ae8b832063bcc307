//! Relay failures and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Everything that ends a relay invocation without a normalized upstream reply.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required inbound field was missing or empty.
    #[error("Missing required fields: EmployeeID, RequestNumber, fileBase64")]
    MissingFields,

    /// The upstream URL or credential is not set.
    #[error("Server not configured: missing TARGET_FUNCTION_URL or FUNCTION_KEY")]
    NotConfigured,

    /// The outbound call could not complete.
    #[error("Upstream API call failed")]
    Upstream {
        /// Upstream status, when one was received before the failure.
        status: Option<StatusCode>,
        details: String,
    },
}

impl RelayError {
    pub fn upstream(status: Option<StatusCode>, details: impl Into<String>) -> Self {
        RelayError::Upstream {
            status,
            details: details.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingFields => StatusCode::BAD_REQUEST,
            RelayError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            // A captured success status must not dress up a failure as one.
            RelayError::Upstream { status, .. } => status
                .filter(|s| !s.is_success())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }

    pub fn body(&self) -> Value {
        match self {
            RelayError::Upstream { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
