//! Host configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("invalid {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// `BACKEND_URL` is not an absolute http(s) URL.
    #[error("invalid BACKEND_URL: {0:?}")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// PlaySwap backend origin, without a trailing slash.
    pub backend_url: String,
    pub port: u16,
    pub proxy_timeout_secs: u64,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `BACKEND_URL`: default `http://127.0.0.1:8080`
    /// - `PORT`: default 3000
    /// - `PROXY_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let backend_url = parse_backend_url(read("BACKEND_URL").as_deref().unwrap_or(DEFAULT_BACKEND_URL))?;
        let port = parse_number("PORT", read("PORT"), DEFAULT_PORT)?;
        let proxy_timeout_secs = parse_number("PROXY_TIMEOUT_SECS", read("PROXY_TIMEOUT_SECS"), DEFAULT_PROXY_TIMEOUT_SECS)?;

        Ok(Self { backend_url, port, proxy_timeout_secs })
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }
}

fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Ok(raw.trim_end_matches('/').to_owned())
        }
        _ => Err(ConfigError::InvalidBackendUrl(raw.to_owned())),
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
