//! Integration tests for environment-driven configuration.

use std::{collections::HashMap, num::NonZeroUsize, time::Duration};

mod common;

use projdash::core::{
    Config, ConfigError, MockLatency,
    config::{MOCK_LATENCY_VAR, PAGE_SIZE_VAR, SAVE_DELAY_VAR, STATUS_CLEAR_VAR},
};

use common::*;

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_unset_vars_use_defaults() -> anyhow::Result<()> {
    let config = config_from(&[])?;

    assert_eq!(config, Config::default());
    assert_eq!(config.page_size, PageSizePolicy::Adaptive);
    assert_eq!(config.mock_latency, MockLatency::default());
    assert_eq!(config.status_clear_after, Duration::from_millis(4000));
    assert_eq!(config.save_delay, Duration::from_millis(900));
    Ok(())
}

#[test]
fn test_page_size_accepts_number_or_adaptive() -> anyhow::Result<()> {
    let config = config_from(&[(PAGE_SIZE_VAR, " 12 ")])?;
    assert_eq!(
        config.page_size,
        PageSizePolicy::Fixed(NonZeroUsize::new(12).unwrap())
    );

    let config = config_from(&[(PAGE_SIZE_VAR, "Adaptive")])?;
    assert_eq!(config.page_size, PageSizePolicy::Adaptive);
    Ok(())
}

#[test]
fn test_zero_page_size_is_rejected() {
    let err = config_from(&[(PAGE_SIZE_VAR, "0")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid { key, ref value, .. } if key == PAGE_SIZE_VAR && value == "0"
    ));
}

#[test]
fn test_millisecond_settings() -> anyhow::Result<()> {
    let config = config_from(&[
        (MOCK_LATENCY_VAR, "0"),
        (STATUS_CLEAR_VAR, "1500"),
        (SAVE_DELAY_VAR, "10"),
    ])?;

    assert_eq!(config.mock_latency, MockLatency::uniform(Duration::ZERO));
    assert_eq!(config.status_clear_after, Duration::from_millis(1500));
    assert_eq!(config.save_delay, Duration::from_millis(10));
    Ok(())
}

#[test]
fn test_invalid_duration_names_the_variable() {
    let err = config_from(&[(SAVE_DELAY_VAR, "soon")]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(SAVE_DELAY_VAR));
    assert!(message.contains("\"soon\""));
}
