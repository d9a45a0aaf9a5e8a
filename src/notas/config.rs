use crate::error::{NotasError, Result};
use crate::session::{DEFAULT_LONG_ABSENCE_MINUTES, DEFAULT_PREVIEW_CHARS};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_LONG_ABSENCE: &str = "long-absence-minutes";
pub const KEY_PREVIEW_CHARS: &str = "draft-preview-chars";

/// Configuration for notas, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotasConfig {
    /// Gaps longer than this are reported as a long absence on restore/resume
    #[serde(default = "default_long_absence")]
    pub long_absence_minutes: i64,

    /// How much of a draft to show in log lines
    #[serde(default = "default_preview_chars")]
    pub draft_preview_chars: usize,
}

fn default_long_absence() -> i64 {
    DEFAULT_LONG_ABSENCE_MINUTES
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for NotasConfig {
    fn default() -> Self {
        Self {
            long_absence_minutes: default_long_absence(),
            draft_preview_chars: default_preview_chars(),
        }
    }
}

impl NotasConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotasError::Io)?;
        let config: NotasConfig =
            serde_json::from_str(&content).map_err(NotasError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotasError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotasError::Serialization)?;
        fs::write(config_path, content).map_err(NotasError::Io)?;
        Ok(())
    }

    pub fn long_absence(&self) -> Duration {
        Duration::try_minutes(self.long_absence_minutes.max(0)).unwrap_or(Duration::MAX)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_LONG_ABSENCE => Some(self.long_absence_minutes.to_string()),
            KEY_PREVIEW_CHARS => Some(self.draft_preview_chars.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || NotasError::Api(format!("Invalid value for {}: {}", key, value));
        match key {
            KEY_LONG_ABSENCE => {
                let minutes: i64 = value.trim().parse().map_err(|_| invalid())?;
                if minutes < 0 || Duration::try_minutes(minutes).is_none() {
                    return Err(invalid());
                }
                self.long_absence_minutes = minutes;
            }
            KEY_PREVIEW_CHARS => {
                self.draft_preview_chars = value.trim().parse().map_err(|_| invalid())?;
            }
            other => return Err(NotasError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[KEY_LONG_ABSENCE, KEY_PREVIEW_CHARS]
    }
}
