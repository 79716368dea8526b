//! Viewer settings with persistence
//!
//! Settings are read from `~/.config/scop/settings.toml`; every key is optional.

use std::fs;
use std::path::PathBuf;

use scop_core::{CameraConfig, ZoomLimits};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Texture bundled in `resources/`.
pub const DEFAULT_TEXTURE: &str = "textures/checker.bmp";

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub controls: ControlSettings,
    pub display: DisplaySettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scop"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            fov: self.camera.fov_degrees.to_radians(),
            near: self.camera.near,
            far: self.camera.far,
            distance_factor: self.camera.distance_factor,
        }
    }

    /// Zoom limits from the controls section, or the defaults if they are unusable.
    pub fn zoom_limits(&self) -> ZoomLimits {
        let limits = ZoomLimits {
            step: self.controls.zoom_step,
            min: self.controls.zoom_min,
            max: self.controls.zoom_max,
        };
        if limits.is_valid() {
            limits
        } else {
            warn!(?limits, "Invalid zoom limits, using defaults");
            ZoomLimits::default()
        }
    }
}

/// Lens settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let config = CameraConfig::default();
        Self {
            fov_degrees: config.fov.to_degrees(),
            near: config.near,
            far: config.far,
            distance_factor: config.distance_factor,
        }
    }
}

/// Keyboard step sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Radians per key press.
    pub rotation_step: f32,
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        let limits = ZoomLimits::default();
        Self {
            rotation_step: scop_core::state::ROTATION_STEP,
            zoom_step: limits.step,
            zoom_min: limits.min,
            zoom_max: limits.max,
        }
    }
}

/// Terminal output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub target_fps: u32,
    /// Image mapped onto the model; also looked up under `resources/`.
    pub texture: PathBuf,
    /// Direction towards the light, in world space.
    pub light_direction: [f32; 3],
    /// Height over width of one terminal cell.
    pub cell_aspect: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            target_fps: 30,
            texture: PathBuf::from(DEFAULT_TEXTURE),
            light_direction: [0.3, 0.5, -1.0],
            cell_aspect: 2.0,
        }
    }
}
