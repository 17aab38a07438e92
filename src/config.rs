//! Referee configuration
//!
//! Loaded from a JSON file. Missing fields take their defaults; a missing file means the
//! whole default configuration.
//!
//! ```json
//! {
//!   "time_controls": {
//!     "short":  { "base_secs": 300 },
//!     "medium": { "base_secs": 900, "increment_secs": 5 },
//!     "long":   { "base_secs": 3600 }
//!   },
//!   "challenge_window_secs": 86400
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::{ClockBudget, TimeControl};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "VERICHESS_CONFIG";

const DEFAULT_CONFIG_FILENAME: &str = "verichess.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControls {
    pub short: ClockBudget,
    pub medium: ClockBudget,
    pub long: ClockBudget,
}

impl Default for TimeControls {
    fn default() -> Self {
        TimeControls {
            short: ClockBudget::minutes(5),
            medium: ClockBudget::minutes(15),
            long: ClockBudget::minutes(60),
        }
    }
}

impl TimeControls {
    pub fn budget(&self, preset: TimeControl) -> ClockBudget {
        match preset {
            TimeControl::Short => self.short,
            TimeControl::Medium => self.medium,
            TimeControl::Long => self.long,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    pub time_controls: TimeControls,
    /// Seconds after a game ends before it may be settled.
    pub challenge_window_secs: u64,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        RefereeConfig {
            time_controls: TimeControls::default(),
            challenge_window_secs: 86_400,
        }
    }
}

impl RefereeConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the file exists but cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<RefereeConfig, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("[CONFIG] No config file found at {:?}. Using defaults.", path);
                return Ok(RefereeConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = RefereeConfig::from_json(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("[CONFIG] Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from the file named by `VERICHESS_CONFIG`, or `verichess.json` in the working
    /// directory.
    pub fn from_env() -> Result<RefereeConfig, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        RefereeConfig::load(path)
    }

    pub fn from_json(json: &str) -> Result<RefereeConfig, ConfigError> {
        let config: RefereeConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Every clock budget must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for preset in [TimeControl::Short, TimeControl::Medium, TimeControl::Long] {
            if self.time_controls.budget(preset).base_secs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{preset} time control needs a positive budget"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RefereeConfig::default();
        assert_eq!(config.time_controls.budget(TimeControl::Short).base_secs, 300);
        assert_eq!(config.time_controls.budget(TimeControl::Medium).base_secs, 900);
        assert_eq!(config.time_controls.budget(TimeControl::Long).base_secs, 3600);
        assert_eq!(config.challenge_window_secs, 86_400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = RefereeConfig::from_json(
            r#"{"time_controls": {"medium": {"base_secs": 600, "increment_secs": 5}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.time_controls.medium,
            ClockBudget {
                base_secs: 600,
                increment_secs: 5
            }
        );
        assert_eq!(config.time_controls.short, ClockBudget::minutes(5));
        assert_eq!(config.challenge_window_secs, 86_400);
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let err = RefereeConfig::from_json(r#"{"time_controls": {"short": {"base_secs": 0}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            RefereeConfig::from_json("{not json"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = RefereeConfig::load("/nonexistent/verichess-config.json").unwrap();
        assert_eq!(config, RefereeConfig::default());
    }
}
