//! Search/item backend connection settings.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from("portal/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the search API (e.g., `https://api.example.org/v1`).
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    /// Check if a backend URL has been provided.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, "portal/0.1");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BackendConfig {
            base_url: "https://api.example.org/v1/".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.normalized_base_url(), "https://api.example.org/v1");
    }
}
