use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
pub const DEFAULT_OUTPUT_PATH: &str = "excel/live_data.xlsx";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REFRESH_INTERVAL_SECS must be a positive number of seconds, got '{0}'")]
    InvalidInterval(String),

    #[error("REQUEST_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Runtime settings, read once at startup and handed to whoever needs them
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_url: String,
    pub output_path: PathBuf,
    pub refresh_interval: Duration,
    /// Upper bound on one listings request, so a stalled endpoint fails the tick
    pub request_timeout: Duration,
}

impl Settings {
    /// Build settings from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// `API_KEY` wins over the legacy `CMC_API_KEY`. An absent key is not an
    /// error here; the API rejects the request instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("API_KEY")
            .or_else(|| non_empty("CMC_API_KEY"))
            .unwrap_or_default();

        let api_url = non_empty("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let output_path = non_empty("OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let refresh_interval = positive_secs(non_empty("REFRESH_INTERVAL_SECS"), DEFAULT_REFRESH_INTERVAL_SECS)
            .map_err(ConfigError::InvalidInterval)?;
        let request_timeout = positive_secs(non_empty("REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS)
            .map_err(ConfigError::InvalidTimeout)?;

        Ok(Settings {
            api_key,
            api_url,
            output_path,
            refresh_interval,
            request_timeout,
        })
    }
}

/// Parse a whole number of seconds > 0; the raw text comes back on failure
fn positive_secs(raw: Option<String>, default: u64) -> Result<Duration, String> {
    match raw {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(raw),
        },
        None => Ok(Duration::from_secs(default)),
    }
}
