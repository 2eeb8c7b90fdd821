//! Configuration file handling for glyphcam.
//!
//! Loads configuration from `~/.config/glyphcam/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ascii::{Palette, PaletteError, SamplingConfig};
use crate::camera::{CameraSettings, Resolution};
use crate::display::{CharSizer, DisplayTheme, SizingPolicy};
use crate::pipeline::{RenderSettings, RESOLUTION_RANGE};

/// Configuration file structure for glyphcam.
/// Loaded from ~/.config/glyphcam/config.toml (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub device: u32,
    #[serde(default = "default_capture_width")]
    pub capture_width: u32,
    #[serde(default = "default_capture_height")]
    pub capture_height: u32,
    #[serde(default = "default_capture_fps")]
    pub fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Sampling width in glyph columns
    #[serde(default = "default_width")]
    pub width: u16,
    /// Built-in palette name (classic, standard, blocks, minimal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    /// Custom glyph ramp, darkest first; overrides `palette`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_palette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Render ticks per second
    #[serde(default = "default_render_fps")]
    pub fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_min_char_size")]
    pub min_char_size: f32,
    #[serde(default = "default_max_char_size")]
    pub max_char_size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub status_bar: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            capture_width: default_capture_width(),
            capture_height: default_capture_height(),
            fps: default_capture_fps(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            palette: None,
            custom_palette: None,
            theme: None,
            fps: default_render_fps(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_char_size: default_min_char_size(),
            max_char_size: default_max_char_size(),
            policy: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { status_bar: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_capture_width() -> u32 {
    Resolution::MEDIUM.width
}

fn default_capture_height() -> u32 {
    Resolution::MEDIUM.height
}

fn default_capture_fps() -> u32 {
    30
}

fn default_width() -> u16 {
    100
}

fn default_render_fps() -> u32 {
    60
}

fn default_min_char_size() -> f32 {
    crate::display::DEFAULT_MIN_CHAR_SIZE
}

fn default_max_char_size() -> f32 {
    crate::display::DEFAULT_MAX_CHAR_SIZE
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
    #[error("Invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Render this config as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default config to `path` (or the default location).
    /// Refuses to overwrite an existing file.
    pub fn write_default(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = Config::default().to_toml()?;
        std::fs::write(&path, content).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Initial render settings snapshot described by the `[render]` section.
    pub fn render_settings(&self) -> Result<RenderSettings, ConfigError> {
        let width = self.render.width;
        if !RESOLUTION_RANGE.contains(&width) {
            return Err(ConfigError::Invalid {
                field: "render.width",
                value: width.to_string(),
            });
        }
        let sampling = SamplingConfig::from_width(width).map_err(|_| ConfigError::Invalid {
            field: "render.width",
            value: width.to_string(),
        })?;

        let palette = match (&self.render.custom_palette, &self.render.palette) {
            (Some(glyphs), _) => Palette::custom(glyphs)?,
            (None, Some(name)) => Palette::from_name(name)?,
            (None, None) => Palette::default(),
        };

        let theme = match &self.render.theme {
            Some(name) => DisplayTheme::from_name(name).ok_or_else(|| ConfigError::Invalid {
                field: "render.theme",
                value: name.clone(),
            })?,
            None => DisplayTheme::default(),
        };

        Ok(RenderSettings::new(sampling, palette, theme))
    }

    /// Glyph sizer described by the `[display]` section.
    pub fn char_sizer(&self) -> Result<CharSizer, ConfigError> {
        let policy = match &self.display.policy {
            Some(name) => SizingPolicy::from_name(name).ok_or_else(|| ConfigError::Invalid {
                field: "display.policy",
                value: name.clone(),
            })?,
            None => SizingPolicy::default(),
        };
        for (field, value) in [
            ("display.min_char_size", self.display.min_char_size),
            ("display.max_char_size", self.display.max_char_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(CharSizer::new(
            self.display.min_char_size,
            self.display.max_char_size,
            policy,
        ))
    }

    /// Camera settings described by the `[camera]` section.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: Resolution {
                width: self.camera.capture_width,
                height: self.camera.capture_height,
            },
            fps: self.camera.fps,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphcam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphcam/config.toml")
        })
}
