//! TOML-based engine configuration.
//!
//! Stores:
//! - Calendar settings (week start, UTC offset used to cut days)
//! - Streak lookback and traversal cap
//! - Week counts for the yearly, grass and mini heatmap views
//!
//! Configuration is stored at `~/.config/habitgrid/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::{Calendar, WeekStart};
use crate::error::{ConfigError, Result};
use crate::habit::{StreakConfig, MAX_STREAK_DAYS};
use crate::stats::{HeatmapConfig, MAX_HEATMAP_WEEKS};

/// Calendar configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    /// Minutes east of UTC used to normalize instants to days
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitgrid/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

const MAX_OFFSET_MINUTES: u32 = 24 * 60;

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        if let Some(parent) = parent_path {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value)?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.calendar.utc_offset_minutes.unsigned_abs() >= MAX_OFFSET_MINUTES {
            return Err(invalid("calendar.utc_offset_minutes", "must be within ±24 hours").into());
        }
        if self.streak.max_traversal_days == 0 {
            return Err(invalid("streak.max_traversal_days", "must be greater than zero").into());
        }
        for (key, days) in [
            ("streak.lookback_days", self.streak.lookback_days),
            ("streak.max_traversal_days", self.streak.max_traversal_days),
        ] {
            if days > MAX_STREAK_DAYS {
                return Err(invalid(key, &format!("must be at most {MAX_STREAK_DAYS}")).into());
            }
        }
        for (key, weeks) in [
            ("heatmap.yearly_weeks", self.heatmap.yearly_weeks),
            ("heatmap.grass_weeks", self.heatmap.grass_weeks),
            ("heatmap.mini_weeks", self.heatmap.mini_weeks),
        ] {
            if weeks == 0 {
                return Err(invalid(key, "must be greater than zero").into());
            }
            if weeks > MAX_HEATMAP_WEEKS {
                return Err(invalid(key, &format!("must be at most {MAX_HEATMAP_WEEKS}")).into());
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The caller persists the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.calendar.utc_offset_minutes, self.calendar.week_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.streak.lookback_days, 365);
        assert_eq!(parsed.heatmap.grass_weeks, 14);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[heatmap]\ngrass_weeks = 20\n[calendar]\nweek_start = \"monday\"\n").unwrap();
        assert_eq!(cfg.heatmap.grass_weeks, 20);
        assert_eq!(cfg.heatmap.yearly_weeks, 53);
        assert_eq!(cfg.calendar.week_start, WeekStart::Monday);
        assert_eq!(cfg.streak, StreakConfig::default());
    }

    #[test]
    fn test_get_by_path() {
        let cfg = Config::default();
        assert_eq!(cfg.get("heatmap.mini_weeks").as_deref(), Some("10"));
        assert_eq!(cfg.get("calendar.week_start").as_deref(), Some("sunday"));
        assert_eq!(cfg.get("nope.nothing"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn test_set_by_path() {
        let mut cfg = Config::default();
        cfg.set("streak.lookback_days", "90").unwrap();
        cfg.set("calendar.week_start", "monday").unwrap();
        cfg.set("calendar.utc_offset_minutes", "-300").unwrap();
        assert_eq!(cfg.streak.lookback_days, 90);
        assert_eq!(cfg.calendar.week_start, WeekStart::Monday);
        assert_eq!(cfg.calendar().offset().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_set_rejects_unknown_and_invalid() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("heatmap.colour", "red"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("heatmap.grass_weeks", "0"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("calendar.week_start", "friday").is_err());
        assert!(cfg.set("streak.lookback_days", "lots").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_extreme_offset_rejected_without_overflow() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("calendar.utc_offset_minutes", "-2147483648"),
            Err(CoreError::Config(ConfigError::InvalidValue { key, .. })) if key == "calendar.utc_offset_minutes"
        ));
        assert!(cfg.set("calendar.utc_offset_minutes", "2147483647").is_err());
        assert!(cfg.set("calendar.utc_offset_minutes", "-1440").is_err());
        cfg.set("calendar.utc_offset_minutes", "-1439").unwrap();
        assert_eq!(cfg.calendar.utc_offset_minutes, -1439);
    }

    #[test]
    fn test_oversized_windows_rejected() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("heatmap.grass_weeks", "4000000000"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("heatmap.yearly_weeks", "521").is_err());
        assert!(cfg.set("streak.lookback_days", "36601").is_err());
        assert!(cfg.set("streak.max_traversal_days", "4294967295").is_err());
        assert_eq!(cfg, Config::default());

        cfg.set("heatmap.yearly_weeks", "520").unwrap();
        assert_eq!(cfg.heatmap.yearly_weeks, 520);
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.heatmap.yearly_weeks = 52;
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\nutc_offset_minutes = 5000\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
