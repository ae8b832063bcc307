//! The single outbound call and the normalization of its reply.
//!
//! # Design Decisions
//! - The credential travels as the `code` query parameter; it never appears in
//!   headers, logs or error details
//! - One shared `reqwest::Client` with a whole-call timeout; no retries
//! - Non-2xx upstream replies are results, not errors

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::config::RelayConfig;
use crate::http::request::X_REQUEST_ID;
use crate::relay::error::RelayError;
use crate::relay::payload::UpstreamPayload;

/// Query parameter carrying the credential.
pub const CREDENTIAL_PARAM: &str = "code";

pub const NON_JSON_NOTE: &str = "Upstream returned non-JSON content. Showing raw.";
pub const NO_CONTENT_NOTE: &str = "Upstream returned no content (possibly HTTP 204).";

/// What came back from the upstream, fully buffered.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// HTTP client for the configured upstream.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client whose calls are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST the payload to the upstream and buffer its reply.
    pub async fn forward(
        &self,
        config: &RelayConfig,
        payload: &UpstreamPayload,
        request_id: Option<&str>,
    ) -> Result<UpstreamReply, RelayError> {
        let url = authorized_url(config).map_err(|e| {
            RelayError::upstream(None, format!("Invalid upstream URL: {e}"))
        })?;

        tracing::info!(upstream = %redacted(&url), "Calling upstream");

        let mut request = self.http.post(url).json(payload);
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RelayError::upstream(e.status(), describe(e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        tracing::info!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            "Upstream responded"
        );

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::upstream(Some(status), describe(e)))?;

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}

/// The upstream URL with the credential set as the `code` query parameter.
///
/// Other query parameters are kept; an existing `code` is replaced.
pub fn authorized_url(config: &RelayConfig) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.upstream_url)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CREDENTIAL_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(CREDENTIAL_PARAM, &config.credential);
    Ok(url)
}

/// URL safe to log: the query string (and with it the credential) removed.
pub fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

// reqwest errors embed the request URL, which carries the credential.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut details = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        details.push_str(": ");
        details.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    details
}

/// Map an upstream reply onto the relay's status and JSON body.
///
/// 2xx collapses to 200; any other status is mirrored. A 204 or zero-length
/// body becomes the no-content envelope, a parseable JSON body is passed
/// through verbatim (`{}` included), anything else is wrapped with its raw text.
pub fn normalize(reply: &UpstreamReply) -> (StatusCode, Value) {
    let status = if reply.status.is_success() {
        StatusCode::OK
    } else {
        reply.status
    };

    if reply.status == StatusCode::NO_CONTENT || reply.body.is_empty() {
        return (status, envelope(NO_CONTENT_NOTE, String::new()));
    }

    let declared_json = reply
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

    let body = declared_json
        .then(|| serde_json::from_slice(&reply.body).ok())
        .flatten()
        .unwrap_or_else(|| {
            envelope(NON_JSON_NOTE, String::from_utf8_lossy(&reply.body).into_owned())
        });

    (status, body)
}

fn envelope(note: &str, raw: String) -> Value {
    json!({ "note": note, "raw": raw })
}
