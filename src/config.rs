//! Store configuration.
//!
//! Delays used by the mock data source. Defaults match the simulated
//! latency of the backend the mock stands in for.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable overriding the fetch delay (milliseconds).
pub const FETCH_DELAY_ENV: &str = "CLINIC_FETCH_DELAY_MS";

/// Environment variable overriding the create delay (milliseconds).
pub const CREATE_DELAY_ENV: &str = "CLINIC_CREATE_DELAY_MS";

/// Configuration for the clinic store and its mock data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Simulated latency of loading the appointment list.
    pub fetch_delay: Duration,

    /// Simulated latency of creating a prescription.
    pub create_delay: Duration,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(1000),
            create_delay: Duration::from_millis(800),
        }
    }
}

impl ClinicConfig {
    /// Configuration with no simulated latency.
    pub fn instant() -> Self {
        Self {
            fetch_delay: Duration::ZERO,
            create_delay: Duration::ZERO,
        }
    }

    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = parse_millis(FETCH_DELAY_ENV, lookup(FETCH_DELAY_ENV))? {
            config.fetch_delay = ms;
        }
        if let Some(ms) = parse_millis(CREATE_DELAY_ENV, lookup(CREATE_DELAY_ENV))? {
            config.create_delay = ms;
        }
        Ok(config)
    }

    /// Set the fetch delay.
    pub fn fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Set the create delay.
    pub fn create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = delay;
        self
    }
}

fn parse_millis(key: &str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw,
        })
}
