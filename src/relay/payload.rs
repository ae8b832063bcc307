//! Inbound and outbound message shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::relay::error::RelayError;

/// Filename forwarded when the caller leaves it out.
pub const DEFAULT_FILENAME: &str = "Default";

/// Body posted by the browser form (or the command-line submitter).
///
/// Every field is optional at this stage; `validate` decides whether the
/// request can be forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(rename = "EmployeeID", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    #[serde(rename = "RequestNumber", default, skip_serializing_if = "Option::is_none")]
    pub request_number: Option<String>,

    /// Anything but a string here falls back to `DEFAULT_FILENAME`.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename: Option<String>,

    #[serde(rename = "fileBase64", default, skip_serializing_if = "Option::is_none")]
    pub file_base64: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl SubmissionRequest {
    /// Parse a raw request body.
    ///
    /// An empty, malformed or wrongly-typed body yields an empty request, which
    /// `validate` then rejects as missing fields. A non-string `filename` alone
    /// does not spoil the body.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Check required fields and resolve the filename.
    pub fn validate(self) -> Result<UpstreamPayload, RelayError> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        match (
            required(self.employee_id),
            required(self.request_number),
            required(self.file_base64),
        ) {
            (Some(employee_id), Some(request_number), Some(file_base64)) => Ok(UpstreamPayload {
                employee_id,
                request_number,
                filename: required(self.filename).unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
                file_base64,
            }),
            _ => Err(RelayError::MissingFields),
        }
    }
}

/// Validated body sent to the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPayload {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,

    #[serde(rename = "RequestNumber")]
    pub request_number: String,

    pub filename: String,

    #[serde(rename = "fileBase64")]
    pub file_base64: String,
}
