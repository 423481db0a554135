//! Game configuration, read from a TOML file.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below, which reproduce the classic 800x450 stage.
//!
//! ```toml
//! [stage]
//! width = 800.0
//! height = 450.0
//!
//! [rules]
//! door_radius = 100.0
//! auto_close_ms = 1000
//!
//! [storage]
//! data_dir = "data"
//!
//! [puzzles]
//! path = "puzzles/floor_02"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stage: StageConfig,
    pub rules: RulesConfig,
    pub storage: StorageConfig,
    pub puzzles: PuzzleConfig,
    pub logging: LoggingConfig,
}

/// Stage geometry in stage units. The avatar's position is its top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: f32,
    pub height: f32,
    pub avatar_size: f32,
    /// Distance covered by one movement key press.
    pub step: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            width: 800.0,
            height: 450.0,
            avatar_size: 30.0,
            step: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub door_x: f32,
    pub door_y: f32,
    /// Maximum distance from the door at which it responds.
    pub door_radius: f32,
    /// Interactables answer only when the avatar is strictly closer than this.
    pub interact_radius: f32,
    /// Where the avatar appears after walking through a door.
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// How long "ACCESS GRANTED." stays up before the puzzle closes itself.
    pub auto_close_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            door_x: 400.0,
            door_y: 0.0,
            door_radius: 100.0,
            interact_radius: 80.0,
            spawn_x: 385.0,
            spawn_y: 400.0,
            auto_close_ms: 1000,
        }
    }
}

impl RulesConfig {
    pub fn auto_close(&self) -> Duration {
        Duration::from_millis(self.auto_close_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Key the save record is stored under (`<data_dir>/<save_key>.json`).
    pub save_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: PathBuf::from("data"),
            save_key: "roomTraceSave".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// A `[[room]]` catalog file or a directory of `room_*.toml` files.
    /// Unset means the built-in catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Defaults to `<data_dir>/room-trace.log`; the terminal belongs to the UI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Read `path`, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let stage = &self.stage;
        let rules = &self.rules;
        let floats = [
            stage.width,
            stage.height,
            stage.avatar_size,
            stage.step,
            rules.door_x,
            rules.door_y,
            rules.door_radius,
            rules.interact_radius,
            rules.spawn_x,
            rules.spawn_y,
        ];
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid(
                "stage and rules values must be finite numbers".into(),
            ));
        }
        if stage.width <= 0.0 || stage.height <= 0.0 {
            return Err(ConfigError::Invalid("stage size must be positive".into()));
        }
        if stage.avatar_size < 0.0
            || stage.avatar_size > stage.width
            || stage.avatar_size > stage.height
        {
            return Err(ConfigError::Invalid(
                "avatar_size must fit inside the stage".into(),
            ));
        }
        if stage.step <= 0.0 {
            return Err(ConfigError::Invalid("step must be positive".into()));
        }
        if self.rules.door_radius < 0.0 || self.rules.interact_radius < 0.0 {
            return Err(ConfigError::Invalid("radii must not be negative".into()));
        }
        if self.storage.save_key.trim().is_empty() {
            return Err(ConfigError::Invalid("save_key must not be empty".into()));
        }
        Ok(())
    }

    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| self.storage.data_dir.join("room-trace.log"))
    }
}
