//! Upstream target and credential, sourced from the environment.
//!
//! These values are read on every relay invocation rather than at startup, so
//! a rotated credential takes effect without a restart.

/// Environment variable holding the absolute upstream URL.
pub const TARGET_URL_VAR: &str = "TARGET_FUNCTION_URL";

/// Environment variable holding the upstream credential.
pub const FUNCTION_KEY_VAR: &str = "FUNCTION_KEY";

/// Where the upstream is and how to authorize against it.
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub upstream_url: String,
    pub credential: String,
}

impl RelayConfig {
    pub fn new(upstream_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            credential: credential.into(),
        }
    }

    /// Build from a variable lookup. Unset and empty values both count as absent.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Some(Self {
            upstream_url: present(TARGET_URL_VAR)?,
            credential: present(FUNCTION_KEY_VAR)?,
        })
    }

    /// Read both values from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

// The credential must never reach a log line.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("upstream_url", &self.upstream_url)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// How the relay obtains its `RelayConfig` for each invocation.
#[derive(Debug, Clone, Default)]
pub enum UpstreamSource {
    /// Read `TARGET_FUNCTION_URL` and `FUNCTION_KEY` on every request.
    #[default]
    Environment,
    /// A fixed value; `None` models a relay with no upstream configured.
    Fixed(Option<RelayConfig>),
}

impl UpstreamSource {
    pub fn load(&self) -> Option<RelayConfig> {
        match self {
            UpstreamSource::Environment => RelayConfig::from_env(),
            UpstreamSource::Fixed(config) => config.clone(),
        }
    }
}
