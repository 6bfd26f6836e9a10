//! Runtime configuration.
//!
//! Every knob has a compiled-in default; `BLOCKFALL_*` environment variables
//! override them. Unset or blank variables keep the default. A variable that
//! is set but does not parse is an error rather than a silent fallback.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

use crate::types::{RotationPolicy, Rules, TopOutRule, CELL_SIZE_PX, MAX_CELL_SIZE_PX};

pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_ROTATION: &str = "BLOCKFALL_ROTATION";
pub const ENV_TOP_OUT: &str = "BLOCKFALL_TOP_OUT";
pub const ENV_CELL_SIZE: &str = "BLOCKFALL_CELL_SIZE";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOCKFALL_LOG_LEVEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: {value} is larger than {max}")]
    OutOfRange {
        var: &'static str,
        value: String,
        max: u32,
    },

    #[error("{var}: unknown rotation policy {value:?} (expected unchecked or checked)")]
    InvalidRotation { var: &'static str, value: String },

    #[error("{var}: unknown top-out rule {value:?} (expected spawn-row or overlap)")]
    InvalidTopOut { var: &'static str, value: String },

    #[error("{var}: unknown log level {value:?}")]
    InvalidLogLevel { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rules: Rules,
    /// Seed for the piece generator
    pub seed: u32,
    /// Edge of one board cell in scene pixels
    pub cell_size_px: u32,
    /// Log file; no file means no log output at all
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Rules::classic(),
            seed: rand::random(),
            cell_size_px: CELL_SIZE_PX,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get(ENV_TICK_MS) {
            config.rules.tick_ms = parse_positive(ENV_TICK_MS, &value)?;
        }
        if let Some(value) = get(ENV_SEED) {
            config.seed = value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: ENV_SEED,
                value: value.clone(),
            })?;
        }
        if let Some(value) = get(ENV_ROTATION) {
            config.rules.rotation = RotationPolicy::from_str(&value)
                .ok_or(ConfigError::InvalidRotation {
                    var: ENV_ROTATION,
                    value,
                })?;
        }
        if let Some(value) = get(ENV_TOP_OUT) {
            config.rules.top_out = TopOutRule::from_str(&value).ok_or(
                ConfigError::InvalidTopOut {
                    var: ENV_TOP_OUT,
                    value,
                },
            )?;
        }
        if let Some(value) = get(ENV_CELL_SIZE) {
            let size = parse_positive::<u32>(ENV_CELL_SIZE, &value)?;
            if size > MAX_CELL_SIZE_PX {
                return Err(ConfigError::OutOfRange {
                    var: ENV_CELL_SIZE,
                    value,
                    max: MAX_CELL_SIZE_PX,
                });
            }
            config.cell_size_px = size;
        }
        config.log_path = get(ENV_LOG_PATH).map(PathBuf::from);
        if let Some(value) = get(ENV_LOG_LEVEL) {
            config.log_level =
                Level::from_str(&value).map_err(|_| ConfigError::InvalidLogLevel {
                    var: ENV_LOG_LEVEL,
                    value,
                })?;
        }

        Ok(config)
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rules, Rules::classic());
        assert_eq!(config.cell_size_px, CELL_SIZE_PX);
        assert_eq!(config.log_path, None);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            (ENV_TICK_MS, "250"),
            (ENV_SEED, "42"),
            (ENV_ROTATION, "Checked"),
            (ENV_TOP_OUT, "overlap"),
            (ENV_CELL_SIZE, "16"),
            (ENV_LOG_PATH, " /tmp/blockfall.log "),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.rules.tick_ms, 250);
        assert_eq!(config.seed, 42);
        assert_eq!(config.rules.rotation, RotationPolicy::Checked);
        assert_eq!(config.rules.top_out, TopOutRule::SpawnOverlap);
        assert_eq!(config.cell_size_px, 16);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[(ENV_TICK_MS, "  "), (ENV_LOG_PATH, "")])).unwrap();
        assert_eq!(config.rules.tick_ms, Rules::classic().tick_ms);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let err = Config::from_lookup(lookup(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_TICK_MS,
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn test_garbage_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENV_SEED, "-3")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENV_ROTATION, "srs")])),
            Err(ConfigError::InvalidRotation { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENV_TOP_OUT, "never")])),
            Err(ConfigError::InvalidTopOut { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn test_oversized_cell_is_rejected() {
        let err = Config::from_lookup(lookup(&[(ENV_CELL_SIZE, "500000000")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                var: ENV_CELL_SIZE,
                value: "500000000".to_string(),
                max: MAX_CELL_SIZE_PX,
            }
        );

        let max = MAX_CELL_SIZE_PX.to_string();
        let config = Config::from_lookup(lookup(&[(ENV_CELL_SIZE, max.as_str())])).unwrap();
        assert_eq!(config.cell_size_px, MAX_CELL_SIZE_PX);
    }

    #[test]
    fn test_error_message_names_the_variable() {
        let err = Config::from_lookup(lookup(&[(ENV_CELL_SIZE, "big")])).unwrap_err();
        assert!(err.to_string().starts_with(ENV_CELL_SIZE));
    }
}
