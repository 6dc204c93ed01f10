//! Backend client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Backend used when `SWEEPLAB_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://genai-labs-backend.onrender.com";

/// Sweeps run every combination before responding, so the default is long.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SWEEPLAB_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SWEEPLAB_TIMEOUT_SECS";

/// Where and how to reach the experiment backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    force_https: bool,
}

impl ClientConfig {
    /// Config for `base_url` with the default timeout. The scheme is used
    /// as given.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            force_https: false,
        }
    }

    /// Read `SWEEPLAB_API_URL` and `SWEEPLAB_TIMEOUT_SECS`.
    ///
    /// Deployed backends only serve TLS, so `http://` is upgraded to
    /// `https://`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparsable timeout or URL.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`ClientConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparsable timeout or URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url.trim()).force_https(true);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{TIMEOUT_ENV}='{raw}' is not a number of seconds: {e}"))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upgrade `http://` base URLs to `https://`.
    #[must_use]
    pub const fn force_https(mut self, force: bool) -> Self {
        self.force_https = force;
        self
    }

    /// Override the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Base URL after the https upgrade, without a trailing slash.
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        let url = self.base_url.trim().trim_end_matches('/');
        match url.strip_prefix("http://") {
            Some(rest) if self.force_https => format!("https://{rest}"),
            _ => url.to_string(),
        }
    }

    /// Check that the base URL is an http(s) URL and the timeout non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the problem.
    pub fn validate(&self) -> Result<()> {
        let url = self.effective_base_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "backend URL '{url}' must start with http:// or https://"
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL).force_https(true)
    }
}
