//! Client configuration.
//!
//! Defaults point at the hosted backend. Every value can be overridden
//! programmatically or from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Hosted backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://conference-alert.pockethost.io";

/// Environment variable overriding the backend URL.
pub const ENV_BASE_URL: &str = "CONFERENCE_ALERT_BASE_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CONFERENCE_ALERT_TIMEOUT_SECS";

/// Environment variable naming a file to persist the session in.
pub const ENV_SESSION_FILE: &str = "CONFERENCE_ALERT_SESSION_FILE";

/// Data access client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash (e.g. "https://conference-alert.pockethost.io").
    pub base_url: String,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Where to persist the session between runs. `None` keeps it in memory.
    pub session_file: Option<PathBuf>,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for a specific backend.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().trim_end_matches('/').to_string();
            }
        }

        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "Ignoring invalid {ENV_TIMEOUT_SECS}"),
            }
        }

        if let Ok(path) = env::var(ENV_SESSION_FILE) {
            if !path.trim().is_empty() {
                config.session_file = Some(PathBuf::from(path.trim()));
            }
        }

        config
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the session in `path`.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Root of the REST API.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Root of the file-serving endpoint.
    #[must_use]
    pub fn files_url(&self) -> String {
        format!("{}/api/files", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            session_file: None,
            user_agent: format!("conference-alert/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
