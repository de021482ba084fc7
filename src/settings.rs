//! Driver settings with persistence
//!
//! Settings are saved to `~/.config/vantage/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Level};
use vantage_camera::CameraConfig;
use vantage_core::TimeConfig;

/// All driver settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub run: RunSettings,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the config directory.
    ///
    /// Never fails: problems fall back to defaults and are described by the
    /// returned [`SettingsOrigin`], which the caller logs once tracing is up.
    pub fn load() -> (Self, SettingsOrigin) {
        match Self::settings_path() {
            Some(path) => Self::load_at(&path),
            None => (
                Self::default(),
                SettingsOrigin::Fallback(anyhow::anyhow!("Could not determine config directory")),
            ),
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_at(path: &Path) -> (Self, SettingsOrigin) {
        if !path.exists() {
            return (Self::default(), SettingsOrigin::Defaults(path.to_path_buf()));
        }
        match Self::load_from(path) {
            Ok(settings) => (settings, SettingsOrigin::File(path.to_path_buf())),
            Err(e) => (Self::default(), SettingsOrigin::Fallback(e)),
        }
    }

    /// Read and parse a settings file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        settings
            .camera
            .validate()
            .with_context(|| format!("Rejected camera settings in {:?}", path))?;
        settings
            .time
            .validate()
            .with_context(|| format!("Rejected time settings in {:?}", path))?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Where loaded settings came from
#[derive(Debug)]
pub enum SettingsOrigin {
    /// Parsed from this file
    File(PathBuf),
    /// No file at this path yet; defaults in use
    Defaults(PathBuf),
    /// The file could not be used; defaults in use
    Fallback(anyhow::Error),
}

impl SettingsOrigin {
    /// Report how settings were obtained
    pub fn log(&self) {
        match self {
            SettingsOrigin::File(path) => info!("Loaded settings from {:?}", path),
            SettingsOrigin::Defaults(path) => {
                info!("No settings file at {:?}, using defaults", path)
            }
            SettingsOrigin::Fallback(e) => warn!("{:#}, using defaults", e),
        }
    }
}

/// How long and how fast the scripted run goes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Number of rendered frames to simulate
    pub frames: u32,
    /// Simulated frames per second
    pub frame_rate: f32,
    /// Max log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_rate: 60.0,
            log_level: "info".to_string(),
        }
    }
}

impl RunSettings {
    /// Parsed log level; unknown names fall back to INFO
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Seconds per simulated frame
    pub fn frame_delta(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / 60.0
        }
    }
}
