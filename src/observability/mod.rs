//! Observability subsystem.
//!
//! Structured logging through `tracing`. Every request runs inside a span
//! carrying its request ID, so relay log lines can be correlated with the
//! upstream call they produced.

pub mod logging;

pub use logging::init_logging;
