//! Client configuration.

use std::time::Duration;

/// Environment variable holding the API base URL.
///
/// Read at build time for the compiled-in default and again at runtime by
/// [`ClientConfig::from_env`].
pub const API_URL_ENV: &str = "DIGIT_PAD_API_URL";

/// Fallback base URL when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::ClassifierClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the classification service; `/predict` is appended.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("DIGIT_PAD_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("digit-pad/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL overridden by [`API_URL_ENV`] when set.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        }
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
