use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelwalk_camera::CameraSettings;
use voxelwalk_render::{Lighting, RenderConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to build a [`crate::Scene`]. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub start_eye: Vec3,
    pub start_at: Vec3,
    pub camera: CameraSettings,
    pub render: RenderConfig,
    pub lighting: Lighting,
    /// Seed for the random cover pass. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            start_eye: Vec3::new(0.0, 1.0, 2.0),
            start_at: Vec3::new(0.0, 1.0, 0.0),
            camera: CameraSettings::default(),
            render: RenderConfig::default(),
            lighting: Lighting::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Read and validate a config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: Self = serde_json::from_reader(std::fs::File::open(path)?)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if camera.viewport_width == 0 || camera.viewport_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                camera.viewport_width, camera.viewport_height
            )));
        }
        if !(camera.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed must be positive, got {}",
                camera.speed
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be in (0, 180) degrees, got {}",
                camera.fov_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got {}..{}",
                camera.near, camera.far
            )));
        }
        if self.start_eye == self.start_at {
            return Err(ConfigError::Invalid(
                "start eye and look-at point coincide".into(),
            ));
        }
        // Looking straight up or down leaves no right axis to pitch or yaw around.
        let look = self.start_at - self.start_eye;
        if look.x.hypot(look.z) < 1e-4 * look.length() {
            return Err(ConfigError::Invalid(format!(
                "start look direction must not be vertical, got {look}"
            )));
        }
        Ok(())
    }
}
