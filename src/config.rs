//! Client configuration, optionally read from the environment.
//!
//! - `SLACK_API_BASE`: override the API root, e.g. for a local mock.
//! - `SLACK_TIMEOUT_SECS`: per-request timeout. There is none by default.

use crate::slack::api::API_BASE_URL;
use std::{env, fmt, num::ParseIntError, time::Duration};
use url::Url;

/// Transport settings shared by every request a client makes.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: API_BASE_URL.clone(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(x) = lookup("SLACK_API_BASE") {
            config.base_url = Url::parse(&x).map_err(ConfigError::InvalidBaseURL)?;
        }

        if let Some(x) = lookup("SLACK_TIMEOUT_SECS") {
            let secs: u64 = x.parse().map_err(ConfigError::InvalidTimeout)?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(self, base_url: Url) -> Self {
        ClientConfig { base_url, ..self }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        ClientConfig {
            timeout: Some(timeout),
            ..self
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseURL(url::ParseError),
    InvalidTimeout(ParseIntError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseURL(e) => write!(f, "Could not parse SLACK_API_BASE: {}", e),
            ConfigError::InvalidTimeout(e) => {
                write!(f, "Could not parse SLACK_TIMEOUT_SECS to u64: {}", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
