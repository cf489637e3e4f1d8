//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_DIR: &str = "orrery";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Tessellation of every body's sphere.
    pub sphere: SphereConfig,
    /// Animation pacing and view.
    pub animation: AnimationConfig,
    /// Texture lookup.
    pub assets: AssetConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration, passed through to whichever renderer is in use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Sphere tessellation shared by all bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    /// Longitude divisions (clamped to at least 3 by the mesh builder).
    pub sector_count: u32,
    /// Latitude divisions (clamped to at least 2 by the mesh builder).
    pub stack_count: u32,
    /// Smooth shading when `true`, flat shading otherwise.
    pub smooth: bool,
}

/// Animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Simulated hours advanced per frame.
    pub increment_hours: f32,
    /// Initial tilt of the view about the X axis, in degrees.
    pub view_angle_deg: f32,
    /// Start with the animation running.
    pub start_running: bool,
    /// Frames to run in headless mode.
    pub frames: u64,
    /// Frames per second used to pace the loop.
    pub target_fps: u32,
}

/// Asset settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the body textures (`sun.bmp`, `earth.bmp`, ...).
    pub texture_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw the latitude/longitude wireframe over each body.
    pub wireframe: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Print each mesh summary at startup.
    pub print_meshes: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            sector_count: 30,
            stack_count: 30,
            smooth: true,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            increment_hours: 6.0,
            view_angle_deg: 15.0,
            start_running: true,
            frames: 240,
            target_fps: 60,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            wireframe: false,
            log_level: "info".to_string(),
            print_meshes: false,
        }
    }
}

impl Config {
    /// Per-user configuration directory, e.g. `~/.config/orrery` on Linux.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_DIR))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read the file; returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
