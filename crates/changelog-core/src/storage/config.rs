//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The UTC offset used to decide calendar days for timeline buckets
//! - Default output format of reports
//! - A default record file
//!
//! Configuration is stored at `~/.config/changelog-console/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Largest accepted UTC offset in either direction, in minutes.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Offset from UTC, in minutes, that defines the calendar day
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Report display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_true")]
    pub show_records: bool,
}

/// Record source configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Record file used when none is given on the command line
    #[serde(default)]
    pub path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/changelog-console/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub records: RecordsConfig,
}

fn default_true() -> bool {
    true
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            json: false,
            show_records: true,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Check values that serde alone cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.utc_offset().map(|_| ())
    }

    /// The configured zone for calendar-day evaluation.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.timeline.utc_offset_minutes;
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidValue {
                key: "timeline.utc_offset_minutes".to_string(),
                message: format!("{minutes} is outside +/-{MAX_OFFSET_MINUTES}"),
            });
        }
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| ConfigError::InvalidValue {
            key: "timeline.utc_offset_minutes".to_string(),
            message: format!("{minutes} is not a valid offset"),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&json, |node, part| node.get(part))?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// The new value is parsed according to the type of the current one.
    /// Unset optional values accept any string.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut json, |node, part| node.get_mut(part)),
            None => Some(&mut json),
        }
        .and_then(|node| node.as_object_mut())
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let existing = parent
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?
                    .into(),
            ),
            serde_json::Value::Object(_) => {
                return Err(invalid("cannot replace a whole section".to_string()))
            }
            _ => serde_json::Value::String(value.to_string()),
        };
        parent.insert(leaf.to_string(), new_value);

        let updated: Config =
            serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }
}
