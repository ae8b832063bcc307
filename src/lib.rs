//! Submission relay: accepts a form upload as JSON and forwards it to one
//! configured upstream endpoint.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod submitter;

pub use config::{RelayConfig, ServerConfig, UpstreamSource};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
