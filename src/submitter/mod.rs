//! Client side of the relay.
//!
//! Applies the same checks as the browser form before anything touches the
//! network: both text fields filled in, a non-empty file, and at most
//! `MAX_FILE_BYTES` of it. The file goes out as plain standard base64, never
//! as a `data:` URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::relay::{SubmissionRequest, DEFAULT_FILENAME};

/// Client-side ceiling on the raw file size (5 MB).
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please fill all fields and attach a file.")]
    MissingFields,

    #[error("File too large (max 5 MB).")]
    FileTooLarge { size: usize },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// What the relay answered.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub status: StatusCode,
    pub body: Value,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Validate the form inputs and build the request body.
pub fn prepare(
    employee_id: &str,
    request_number: &str,
    filename: Option<&str>,
    file: &[u8],
) -> Result<SubmissionRequest, SubmitError> {
    let employee_id = employee_id.trim();
    let request_number = request_number.trim();

    if employee_id.is_empty() || request_number.is_empty() || file.is_empty() {
        return Err(SubmitError::MissingFields);
    }
    if file.len() > MAX_FILE_BYTES {
        return Err(SubmitError::FileTooLarge { size: file.len() });
    }

    let filename = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILENAME);

    Ok(SubmissionRequest {
        employee_id: Some(employee_id.to_string()),
        request_number: Some(request_number.to_string()),
        filename: Some(filename.to_string()),
        file_base64: Some(STANDARD.encode(file)),
    })
}

/// POST a prepared request to the relay endpoint, once.
///
/// A relay body that is not JSON is reported as `{}`.
pub async fn submit(
    client: &reqwest::Client,
    endpoint: &str,
    request: &SubmissionRequest,
) -> Result<SubmitOutcome, SubmitError> {
    let response = client.post(endpoint).json(request).send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Default::default()));

    tracing::debug!(status = status.as_u16(), "Relay responded");
    Ok(SubmitOutcome { status, body })
}
