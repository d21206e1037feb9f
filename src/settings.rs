//! Session settings and preferences
//!
//! Loaded from an optional JSON file. Gameplay constants are fixed in
//! [`crate::consts`]; settings only pick the seed, the map and audio levels.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{MapError, TileMap};

/// Settings loading failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} volume {value} must be between 0.0 and 1.0")]
    Volume { name: &'static str, value: f32 },
    #[error("invalid map layout: {0}")]
    Map(#[from] MapError),
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// Map rows overriding the built-in arena
    pub layout: Option<Vec<String>>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            layout: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check volume ranges and the map override
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("master", self.master_volume),
            ("sfx", self.sfx_volume),
            ("music", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::Volume { name, value });
            }
        }
        self.map()?;
        Ok(())
    }

    /// Build the session map: the override if present, else the built-in arena
    pub fn map(&self) -> Result<TileMap, MapError> {
        match &self.layout {
            Some(rows) => TileMap::parse(rows.as_slice()),
            None => TileMap::default_arena(),
        }
    }
}
