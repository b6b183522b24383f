//! Directional light with shadow mapping support

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Light uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Light-space view-projection matrix for shadow mapping.
    pub view_proj: [[f32; 4]; 4],
    /// Direction the light travels (normalized), w unused.
    pub direction: [f32; 4],
    /// Light color (RGB) and intensity in w.
    pub color: [f32; 4],
    /// Ambient color (RGB) and strength in w.
    pub ambient: [f32; 4],
    /// x = depth bias, y = normal bias, z = softness, w = shadows enabled.
    pub params: [f32; 4],
}

/// A single directional light covering the scene.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Direction the light travels (normalized).
    pub direction: Vec3,
    /// Light color (RGB).
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Ambient light color (RGB).
    pub ambient_color: Vec3,
    /// Ambient light strength.
    pub ambient_strength: f32,
    /// Whether shadow mapping is active.
    pub shadows_enabled: bool,
    /// Shadow depth bias to prevent shadow acne.
    pub shadow_bias: f32,
    /// Normal-based shadow bias for grazing angles.
    pub shadow_normal_bias: f32,
    /// Shadow softness (PCF filter size).
    pub shadow_softness: f32,
    /// Half-extent of the light's orthographic frustum.
    pub shadow_extent: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionalLight {
    /// Create a light shining down at an angle, matching the demo scene.
    pub fn new() -> Self {
        Self {
            direction: Vec3::new(-0.4, -1.0, 0.3).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
            ambient_color: Vec3::ONE,
            ambient_strength: 0.3,
            shadows_enabled: true,
            shadow_bias: 0.005,
            shadow_normal_bias: 0.01,
            shadow_softness: 1.0,
            shadow_extent: 10.0,
        }
    }

    /// Set light direction (normalized internally).
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize_or(Vec3::NEG_Y);
    }

    /// Light-space view-projection matrix centered on the scene.
    pub fn view_proj(&self, scene_center: Vec3) -> Mat4 {
        let eye = scene_center - self.direction * self.shadow_extent * 2.0;
        // Pick an up vector not parallel to the light direction.
        let up = if self.direction.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(eye, scene_center, up);
        let e = self.shadow_extent;
        let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.1, e * 6.0);
        proj * view
    }

    /// Build the uniform for the given scene center.
    pub fn uniform(&self, scene_center: Vec3) -> LightUniform {
        LightUniform {
            view_proj: self.view_proj(scene_center).to_cols_array_2d(),
            direction: [self.direction.x, self.direction.y, self.direction.z, 0.0],
            color: [self.color.x, self.color.y, self.color.z, self.intensity],
            ambient: [
                self.ambient_color.x,
                self.ambient_color.y,
                self.ambient_color.z,
                self.ambient_strength,
            ],
            params: [
                self.shadow_bias,
                self.shadow_normal_bias,
                self.shadow_softness,
                if self.shadows_enabled { 1.0 } else { 0.0 },
            ],
        }
    }
}
