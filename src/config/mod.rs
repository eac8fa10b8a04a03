//! Configuration handling for the content pipeline.
//!
//! Every setting has a development default; `Config::from_env` overrides
//! them from environment variables and validates the result.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::extractor::cleaner::{DEFAULT_NON_ASCII_RUN, MAX_NON_ASCII_RUN};
use crate::extractor::corruption::DEFAULT_GARBLE_THRESHOLD_PERCENT;
use crate::extractor::{Cleaner, GarbleDetector};
use crate::fetcher::FetchSettings;
use crate::fetcher::types::{
    DEFAULT_FALLBACK_TIMEOUT, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_REDIRECTS,
    DEFAULT_PRIMARY_TIMEOUT,
};

/// Environment variable names.
pub const ENV_PRIMARY_TIMEOUT_SECS: &str = "FEEDTEXT_PRIMARY_TIMEOUT_SECS";
pub const ENV_FALLBACK_TIMEOUT_SECS: &str = "FEEDTEXT_FALLBACK_TIMEOUT_SECS";
pub const ENV_MAX_REDIRECTS: &str = "FEEDTEXT_MAX_REDIRECTS";
pub const ENV_MAX_BODY_BYTES: &str = "FEEDTEXT_MAX_BODY_BYTES";
pub const ENV_GARBLE_THRESHOLD_PERCENT: &str = "FEEDTEXT_GARBLE_THRESHOLD_PERCENT";
pub const ENV_NON_ASCII_RUN: &str = "FEEDTEXT_NON_ASCII_RUN";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    primary_timeout: Duration,
    fallback_timeout: Duration,
    max_redirects: usize,
    max_body_bytes: u64,
    garble_threshold_percent: u32,
    non_ascii_run: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
            fallback_timeout: DEFAULT_FALLBACK_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            garble_threshold_percent: DEFAULT_GARBLE_THRESHOLD_PERCENT,
            non_ascii_run: DEFAULT_NON_ASCII_RUN,
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults for any
    /// variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let primary_timeout = read_var::<u64>(ENV_PRIMARY_TIMEOUT_SECS)?
            .map(|secs| positive_secs(ENV_PRIMARY_TIMEOUT_SECS, secs))
            .transpose()?
            .unwrap_or(defaults.primary_timeout);
        let fallback_timeout = read_var::<u64>(ENV_FALLBACK_TIMEOUT_SECS)?
            .map(|secs| positive_secs(ENV_FALLBACK_TIMEOUT_SECS, secs))
            .transpose()?
            .unwrap_or(defaults.fallback_timeout);
        let max_redirects = read_var(ENV_MAX_REDIRECTS)?.unwrap_or(defaults.max_redirects);

        let max_body_bytes = read_var(ENV_MAX_BODY_BYTES)?.unwrap_or(defaults.max_body_bytes);
        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_MAX_BODY_BYTES,
                reason: "must be greater than zero".to_string(),
            });
        }

        let garble_threshold_percent = read_var(ENV_GARBLE_THRESHOLD_PERCENT)?
            .unwrap_or(defaults.garble_threshold_percent);
        if garble_threshold_percent > 100 {
            return Err(ConfigError::InvalidValue {
                field: ENV_GARBLE_THRESHOLD_PERCENT,
                reason: format!("{garble_threshold_percent} is not a percentage"),
            });
        }

        let non_ascii_run = read_var(ENV_NON_ASCII_RUN)?.unwrap_or(defaults.non_ascii_run);
        if !(1..=MAX_NON_ASCII_RUN).contains(&non_ascii_run) {
            return Err(ConfigError::InvalidValue {
                field: ENV_NON_ASCII_RUN,
                reason: format!("must be between 1 and {MAX_NON_ASCII_RUN}"),
            });
        }

        Ok(Self {
            primary_timeout,
            fallback_timeout,
            max_redirects,
            max_body_bytes,
            garble_threshold_percent,
            non_ascii_run,
        })
    }

    /// Total time allowed for the primary request, redirects included.
    pub fn primary_timeout(&self) -> Duration {
        self.primary_timeout
    }
    pub fn fallback_timeout(&self) -> Duration {
        self.fallback_timeout
    }
    /// Redirect limit for the primary request. The fallback request keeps the
    /// HTTP client's own default.
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
    pub fn garble_threshold_percent(&self) -> u32 {
        self.garble_threshold_percent
    }
    pub fn non_ascii_run(&self) -> usize {
        self.non_ascii_run
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            primary_timeout: self.primary_timeout,
            fallback_timeout: self.fallback_timeout,
            max_redirects: self.max_redirects,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn garble_detector(&self) -> GarbleDetector {
        GarbleDetector::new(self.garble_threshold_percent)
    }

    pub fn cleaner(&self) -> Cleaner {
        Cleaner::new(self.non_ascii_run)
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn read_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: name,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

fn positive_secs(field: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "timeout must be at least one second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
