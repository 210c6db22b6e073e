//! Game settings loaded from `assets/settings.json`.
//!
//! Every field has a default, so the file may list only what it overrides, or
//! be absent altogether.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hop_core::{PlayerConfig, PlayerState};
use serde::Deserialize;
use thiserror::Error;

pub const GAME_NAME: &str = "Hopper";
pub const SETTINGS_PATH: &str = "assets/settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub fps: u32,
    pub locales: Vec<String>,
    pub assets_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub font: String,
    pub click_sound: String,
    pub ground_height: u32,
    pub player: PlayerConfig,
    /// Playback speed of each player animation, in frames per second.
    pub animation_frequencies: HashMap<PlayerState, u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: GAME_NAME.to_string(),
            window_width: 1280,
            window_height: 720,
            canvas_width: 1920,
            canvas_height: 1080,
            fps: 60,
            locales: vec!["en".to_string(), "fr".to_string(), "de".to_string()],
            assets_dir: PathBuf::from("assets"),
            log_file: PathBuf::from("logs/game.log"),
            log_level: "debug".to_string(),
            font: "DejaVuSans-Bold.ttf".to_string(),
            click_sound: "click.wav".to_string(),
            ground_height: 120,
            player: PlayerConfig::default(),
            animation_frequencies: HashMap::from([
                (PlayerState::Idle, 4),
                (PlayerState::Run, 12),
                (PlayerState::Jump, 8),
            ]),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Falls back to the defaults when `path` does not exist. A file that
    /// exists but does not parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(SettingsError::Invalid("window size must be non-zero".into()));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SettingsError::Invalid("canvas size must be non-zero".into()));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be greater than zero".into()));
        }
        if self.locales.is_empty() {
            return Err(SettingsError::Invalid("at least one locale is required".into()));
        }
        if self.ground_height >= self.canvas_height {
            return Err(SettingsError::Invalid(format!(
                "ground height {} does not fit in a canvas {} pixels tall",
                self.ground_height, self.canvas_height
            )));
        }
        for state in PlayerState::ALL {
            match self.animation_frequencies.get(&state) {
                None => {
                    return Err(SettingsError::Invalid(format!(
                        "animation_frequencies has no entry for '{}'",
                        state.label()
                    )));
                }
                Some(0) => {
                    return Err(SettingsError::Invalid(format!(
                        "animation frequency for '{}' must be greater than zero",
                        state.label()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.assets_dir.join("images")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.assets_dir.join("fonts")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.assets_dir.join("sounds")
    }

    pub fn i18n_dir(&self) -> PathBuf {
        self.assets_dir.join("i18n")
    }
}
