//! Submission relay.
//!
//! # Data Flow
//! ```text
//! POST /api/submit
//!     → handler.rs (read body, load RelayConfig)
//!     → payload.rs (lenient parse, required-field check)
//!     → upstream.rs (authorize URL, one bounded POST, normalize reply)
//!     → error.rs (every failure becomes a JSON response)
//! ```
//!
//! Each invocation is independent: nothing is cached, retried or persisted.

pub mod error;
pub mod handler;
pub mod payload;
pub mod upstream;

pub use error::RelayError;
pub use handler::{relay, submit_handler};
pub use payload::{SubmissionRequest, UpstreamPayload, DEFAULT_FILENAME};
pub use upstream::{normalize, UpstreamClient, UpstreamReply, CREDENTIAL_PARAM};
