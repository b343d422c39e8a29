//! TOML-based application configuration.
//!
//! Stores:
//! - REST API location and bearer token
//! - Overlap detection strategy used for the timeline
//! - Timeline bar colours
//!
//! Configuration is stored at `~/.config/taskline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{config_dir, data_dir};
use crate::error::{ConfigError, Result};
use crate::overlap::{DetectionStrategy, OverlapDetector};

const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "TASKLINE_API_URL";
/// Environment variable overriding `api.token`.
pub const TOKEN_ENV: &str = "TASKLINE_TOKEN";

/// REST backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request, if set.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Timeline bar colours, as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    #[serde(default = "default_overlap_color")]
    pub overlap: String,
    #[serde(default = "default_completed_color")]
    pub completed: String,
    #[serde(default = "default_in_progress_color")]
    pub in_progress: String,
    #[serde(default = "default_blocked_color")]
    pub blocked: String,
    #[serde(default = "default_not_started_color")]
    pub not_started: String,
}

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub strategy: DetectionStrategy,
    #[serde(default)]
    pub colors: ColorPalette,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/taskline/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:5000/api".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_overlap_color() -> String {
    "#eab308".into()
}
fn default_completed_color() -> String {
    "#16a34a".into()
}
fn default_in_progress_color() -> String {
    "#2563eb".into()
}
fn default_blocked_color() -> String {
    "#dc2626".into()
}
fn default_not_started_color() -> String {
    "#9ca3af".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            overlap: default_overlap_color(),
            completed: default_completed_color(),
            in_progress: default_in_progress_color(),
            blocked: default_blocked_color(),
            not_started: default_not_started_color(),
        }
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
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
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

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by dot-separated key. The value must fit the
    /// existing field's type. Does not persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Replace API settings with explicit overrides when given.
    pub fn apply_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }

    /// Apply `TASKLINE_API_URL` and `TASKLINE_TOKEN` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(std::env::var(API_URL_ENV).ok(), std::env::var(TOKEN_ENV).ok())
    }

    /// Detector configured with the timeline strategy.
    pub fn detector(&self) -> OverlapDetector {
        OverlapDetector::new().with_strategy(self.timeline.strategy)
    }

    /// Read the config file if there is one, without creating anything on
    /// disk. Missing or unreadable files fall back to defaults.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&config_dir().join(CONFIG_FILE))
    }

    /// Like [`Config::load_or_default`] for an explicit path.
    pub fn load_or_default_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "cannot read config, using defaults");
                }
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Self::default()
        })
    }
}
