//! `POST /api/submit`.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::config::UpstreamSource;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::relay::error::RelayError;
use crate::relay::payload::SubmissionRequest;
use crate::relay::upstream::{normalize, UpstreamClient};

/// Axum entry point for the relay.
pub async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request_id = request_id(&headers).unwrap_or("unknown").to_string();

    // No size bound on the inbound body; a failed read counts as an empty one.
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    match relay(&state.upstream, &state.source, &body, Some(&request_id)).await {
        Ok((status, json)) => (status, Json(json)).into_response(),
        Err(err) => {
            match &err {
                RelayError::MissingFields => {
                    tracing::warn!(request_id = %request_id, "Rejected submission with missing fields");
                }
                RelayError::NotConfigured => {
                    tracing::error!(request_id = %request_id, "Upstream URL or credential not configured");
                }
                RelayError::Upstream { details, .. } => {
                    tracing::error!(request_id = %request_id, details = %details, "Upstream call failed");
                }
            }
            err.into_response()
        }
    }
}

/// Run one relay invocation against a raw request body.
///
/// Returns the status and JSON body to send back; every failure is a
/// `RelayError` that renders to JSON on its own.
pub async fn relay(
    upstream: &UpstreamClient,
    source: &UpstreamSource,
    body: &[u8],
    request_id: Option<&str>,
) -> Result<(StatusCode, Value), RelayError> {
    let config = source.load().ok_or(RelayError::NotConfigured)?;
    let payload = SubmissionRequest::from_body(body).validate()?;

    tracing::debug!(
        employee_id = %payload.employee_id,
        request_number = %payload.request_number,
        filename = %payload.filename,
        encoded_len = payload.file_base64.len(),
        "Forwarding submission"
    );

    let reply = upstream.forward(&config, &payload, request_id).await?;
    Ok(normalize(&reply))
}
