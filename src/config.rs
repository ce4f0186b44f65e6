//! Client configuration.

use crate::error::{HjrsError, Result};
use std::time::Duration;

/// Production catalog backend.
pub const DEFAULT_BASE_URL: &str = "https://hjrs-backend-production.up.railway.app";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings used to build a [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("hjrs-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Read `HJRS_API_URL` and `HJRS_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HJRS_API_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url)?;
            }
        }

        if let Ok(secs) = std::env::var("HJRS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HjrsError::Config(format!("HJRS_TIMEOUT_SECS is not a number: {:?}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replace the base URL after checking that it parses as an absolute URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let parsed = url::Url::parse(&url)
            .map_err(|e| HjrsError::Config(format!("Invalid base URL {:?}: {}", url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(HjrsError::Config(format!("Invalid base URL {:?}", url)));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
