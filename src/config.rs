//! Reminder configuration
//!
//! Initial selections for a session.  Loaded from defaults or a JSON
//! document at startup; never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BlinkRate, Volume};

/// Default bundled sound resource.
pub const DEFAULT_SOUND_RESOURCE: &str = "blink_sound.mp3";

/// Core reminder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct ReminderConfig {
    // --- Reminder ---
    /// Rate selected in the picker at startup
    pub blink_rate: BlinkRate,
    /// Initial output volume (0.0-1.0)
    pub volume: Volume,
    /// Begin reminders as soon as the loop starts
    pub autostart: bool,

    // --- Sound resource ---
    /// File name of the cue sound
    pub sound_resource: String,
    /// Extra directories searched before the executable's own directory
    pub resource_dirs: Vec<PathBuf>,

    // --- Logging ---
    /// Default `env_logger` filter (overridden by `RUST_LOG`)
    pub log_level: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            blink_rate: BlinkRate::Fifteen,
            volume: Volume::FULL,
            autostart: false,

            sound_resource: DEFAULT_SOUND_RESOURCE.to_string(),
            resource_dirs: Vec::new(),

            log_level: "info".to_string(),
        }
    }
}

/// Config document as written on disk.  Rate and volume are kept raw so
/// that range errors surface as typed [`ConfigError`]s, not parse errors.
#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    blink_rate: i64,
    volume: f32,
    autostart: bool,
    sound_resource: String,
    resource_dirs: Vec<PathBuf>,
    log_level: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        let d = ReminderConfig::default();
        Self {
            blink_rate: i64::from(d.blink_rate.per_minute()),
            volume: d.volume.level(),
            autostart: d.autostart,
            sound_resource: d.sound_resource,
            resource_dirs: d.resource_dirs,
            log_level: d.log_level,
        }
    }
}

impl TryFrom<RawConfig> for ReminderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            blink_rate: BlinkRate::try_from(raw.blink_rate)?,
            volume: Volume::new(raw.volume)?,
            autostart: raw.autostart,
            sound_resource: raw.sound_resource,
            resource_dirs: raw.resource_dirs,
            log_level: raw.log_level,
        })
    }
}

impl ReminderConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let config = Self::try_from(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Range checks not already enforced by the field types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sound_resource.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("sound_resource must not be empty"));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("log_level must not be empty"));
        }
        Ok(())
    }
}
