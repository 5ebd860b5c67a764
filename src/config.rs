use crate::state::{Bounds, Pos, Size, Velocity};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper end of the tick rate, also the top of the debug menu slider.
pub const MAX_TICK_HZ: f64 = 2000.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: String::from("Bouncing Me"),
            width: 1000,
            height: 508,
            resizable: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ObjectConfig {
    pub size: Size,
    pub start: Pos,
    pub velocity: Velocity,
    pub color: [f32; 4],
    pub sprite: Option<PathBuf>,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        ObjectConfig {
            size: Size::new(100, 50),
            start: Pos::new(12, 12),
            velocity: Velocity::new(1, 1),
            color: [0.20, 0.45, 0.85, 1.0],
            sprite: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub container: Size,
    pub object: ObjectConfig,
    pub tick_hz: f64,
    pub max_ticks_per_frame: u32,
    /// Start moving right away instead of waiting for the first click.
    pub autostart: bool,
    /// Resize the container along with the window.
    pub follow_window: bool,
    pub sounds_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: WindowConfig::default(),
            container: Size::new(1000, 508),
            object: ObjectConfig::default(),
            tick_hz: 240.0,
            max_ticks_per_frame: 64,
            autostart: false,
            follow_window: false,
            sounds_dir: PathBuf::from("assets/sounds"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file is not an error, the defaults are used instead.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        log::info!("loading config from {}", path.display());
        Config::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.object.size.w <= 0 || self.object.size.h <= 0 {
            return Err(ConfigError::Invalid(format!(
                "object size must be positive, got {}x{}",
                self.object.size.w, self.object.size.h
            )));
        }
        let bounds = Bounds::for_object(self.container, self.object.size)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !bounds.contains(&self.object.start) {
            return Err(ConfigError::Invalid(format!(
                "start position ({}, {}) is outside bounds {}x{}",
                self.object.start.x,
                self.object.start.y,
                bounds.max_x(),
                bounds.max_y()
            )));
        }
        bounds
            .check_speed(self.object.velocity)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !(self.tick_hz > 0.0 && self.tick_hz <= MAX_TICK_HZ) {
            return Err(ConfigError::Invalid(format!(
                "tick_hz must be in (0, {}], got {}",
                MAX_TICK_HZ, self.tick_hz
            )));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid(String::from(
                "max_ticks_per_frame must be at least 1",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        let bounds = Bounds::for_object(config.container, config.object.size).unwrap();
        assert_eq!((bounds.max_x(), bounds.max_y()), (900, 458));
    }

    #[test]
    fn test_object_larger_than_container() {
        let mut config = Config::default();
        config.object.size = Size::new(1000, 10);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_start_outside_bounds() {
        let mut config = Config::default();
        config.object.start = Pos::new(900, 0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_velocity_too_fast() {
        let mut config = Config::default();
        config.object.velocity = Velocity::new(1, 230);
        assert!(config.validate().is_err());
        config.object.velocity = Velocity::new(-450, 229);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_rate_must_be_positive() {
        let mut config = Config::default();
        config.tick_hz = 0.0;
        assert!(config.validate().is_err());
        config.tick_hz = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_rate_is_capped() {
        let mut config = Config::default();
        config.tick_hz = MAX_TICK_HZ;
        assert!(config.validate().is_ok());
        config.tick_hz = 5000.0;
        assert!(config.validate().is_err());
        config.tick_hz = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bouncing-me.json");

        let mut config = Config::default();
        config.autostart = true;
        config.object.velocity = Velocity::new(-2, 3);
        config.object.sprite = Some(PathBuf::from("assets/ball.png"));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "autostart": true, "object": { "velocity": { "dx": -1, "dy": 1 } } }"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.autostart);
        assert_eq!(config.object.velocity, Velocity::new(-1, 1));
        assert_eq!(config.object.size, Size::new(100, 50));
        assert_eq!(config.container, Size::new(1000, 508));
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
