use std::{env, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::core::{detail::MockLatency, paging::PageSizePolicy};

pub const PAGE_SIZE_VAR: &str = "PROJDASH_PAGE_SIZE";
pub const MOCK_LATENCY_VAR: &str = "PROJDASH_MOCK_LATENCY_MS";
pub const STATUS_CLEAR_VAR: &str = "PROJDASH_STATUS_CLEAR_MS";
pub const SAVE_DELAY_VAR: &str = "PROJDASH_SAVE_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub page_size: PageSizePolicy,
    pub mock_latency: MockLatency,
    /// How long a save status message stays up. Zero keeps it until replaced.
    pub status_clear_after: Duration,
    pub save_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PageSizePolicy::Adaptive,
            mock_latency: MockLatency::default(),
            status_clear_after: Duration::from_millis(4000),
            save_delay: Duration::from_millis(900),
        }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let page_size = match var(&lookup, PAGE_SIZE_VAR) {
            None => defaults.page_size,
            Some(value) if value.eq_ignore_ascii_case("adaptive") => PageSizePolicy::Adaptive,
            Some(value) => PageSizePolicy::Fixed(parse(PAGE_SIZE_VAR, &value)?),
        };
        let mock_latency = var(&lookup, MOCK_LATENCY_VAR)
            .map(|value| parse_millis(MOCK_LATENCY_VAR, &value).map(MockLatency::uniform))
            .transpose()?
            .unwrap_or(defaults.mock_latency);
        let status_clear_after = var(&lookup, STATUS_CLEAR_VAR)
            .map(|value| parse_millis(STATUS_CLEAR_VAR, &value))
            .transpose()?
            .unwrap_or(defaults.status_clear_after);
        let save_delay = var(&lookup, SAVE_DELAY_VAR)
            .map(|value| parse_millis(SAVE_DELAY_VAR, &value))
            .transpose()?
            .unwrap_or(defaults.save_delay);

        Ok(Self {
            page_size,
            mock_latency,
            status_clear_after,
            save_delay,
        })
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let value = lookup(key).map(|v| v.trim().to_string());
    if value.is_none() {
        info!("{key} not set, using default");
    }
    value
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse::<u64>(key, value).map(Duration::from_millis)
}
