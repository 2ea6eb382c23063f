//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Motivation generator settings (model, endpoint, timeout, fallbacks)
//! - Weekly goal
//! - Log level
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Could not generate a message right now. But keep up the great work, you are doing amazing!";
pub const DEFAULT_IDENTITY_FALLBACK_MESSAGE: &str =
    "Every rep is a vote for the person you are becoming. Keep casting those votes!";

/// Motivation generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    #[serde(default = "default_identity_fallback_message")]
    pub identity_fallback_message: String,
}

/// Progress goal configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Completions per week. 0 means one per habit per day.
    #[serde(default)]
    pub weekly_goal: u32,
}

/// Logging configuration. `RUST_LOG` takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub motivation: MotivationConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_true() -> bool {
    true
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.into()
}
fn default_identity_fallback_message() -> String {
    DEFAULT_IDENTITY_FALLBACK_MESSAGE.into()
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for MotivationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            fallback_message: default_fallback_message(),
            identity_fallback_message: default_identity_fallback_message(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl GoalsConfig {
    pub fn weekly_goal(&self) -> Option<u32> {
        (self.weekly_goal > 0).then_some(self.weekly_goal)
    }
}

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

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.motivation.enabled);
        assert_eq!(parsed.motivation.model, "gemini-2.0-flash");
        assert_eq!(parsed.goals.weekly_goal(), None);
        assert_eq!(parsed.log.level, "warn");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let parsed: Config = toml::from_str("[motivation]\nenabled = false\n").unwrap();
        assert!(!parsed.motivation.enabled);
        assert_eq!(parsed.motivation.timeout_secs, 30);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("motivation.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("motivation.timeout_secs").as_deref(), Some("30"));
        assert_eq!(cfg.get("log.level").as_deref(), Some("warn"));
        assert!(cfg.get("motivation").is_none());
        assert!(cfg.get("motivation.missing_key").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("motivation.enabled", "false").unwrap();
        cfg.apply("goals.weekly_goal", "25").unwrap();
        cfg.apply("motivation.model", "gemini-1.5-pro").unwrap();
        assert!(!cfg.motivation.enabled);
        assert_eq!(cfg.goals.weekly_goal(), Some(25));
        assert_eq!(cfg.motivation.model, "gemini-1.5-pro");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.apply("motivation.nonexistent", "x").is_err());
        assert!(cfg.apply("", "x").is_err());
        assert!(cfg.apply("goals", "3").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("motivation.enabled", "not_a_bool").is_err());
        assert!(cfg.apply("goals.weekly_goal", "-1").is_err());
        assert_eq!(cfg, Config::default());
    }
}
