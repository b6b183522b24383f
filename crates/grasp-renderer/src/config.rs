//! Renderer configuration
//!
//! Serializable settings the frontend persists alongside its own config.

use serde::{Deserialize, Serialize};

/// Renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Viewport clear color (RGB).
    pub clear_color: [f32; 3],
    /// Ground grid settings.
    pub grid: GridConfig,
    /// Lighting settings.
    pub lighting: LightingConfig,
    /// Camera settings.
    pub camera: CameraConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.15, 0.15, 0.18],
            grid: GridConfig::default(),
            lighting: LightingConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Ground grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Half-extent of the grid.
    pub size: f32,
    /// Spacing between grid lines.
    pub spacing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: crate::constants::grid::DEFAULT_SIZE,
            spacing: crate::constants::grid::DEFAULT_SPACING,
        }
    }
}

/// Lighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction the light travels.
    pub direction: [f32; 3],
    /// Light intensity multiplier.
    pub intensity: f32,
    /// Ambient light strength.
    pub ambient_strength: f32,
    /// Whether shadow mapping is active.
    pub shadows_enabled: bool,
    /// Shadow softness (PCF filter size).
    pub shadow_softness: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        let light = crate::light::DirectionalLight::new();
        Self {
            direction: light.direction.to_array(),
            intensity: light.intensity,
            ambient_strength: light.ambient_strength,
            shadows_enabled: light.shadows_enabled,
            shadow_softness: light.shadow_softness,
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { fov_degrees: 45.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_ron() {
        let config = RendererConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let back: RendererConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.grid.size, config.grid.size);
        assert_eq!(back.camera.fov_degrees, config.camera.fov_degrees);
    }
}
