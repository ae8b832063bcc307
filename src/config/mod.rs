//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! relay.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable, loaded once at startup)
//!
//! Per request:
//!     environment (TARGET_FUNCTION_URL, FUNCTION_KEY)
//!     → upstream.rs (RelayConfig, or None when incomplete)
//! ```
//!
//! # Design Decisions
//! - Server settings are immutable once loaded
//! - All fields have defaults so the config file is optional
//! - Upstream URL and credential never live in the config file

pub mod loader;
pub mod schema;
pub mod upstream;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AssetsConfig, ListenerConfig, ObservabilityConfig, ServerConfig, TimeoutConfig};
pub use upstream::{RelayConfig, UpstreamSource, FUNCTION_KEY_VAR, TARGET_URL_VAR};
