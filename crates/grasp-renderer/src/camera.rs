//! Orbit camera for the 3D viewport (Y-up world)

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// Orbit camera
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    // Orbit state
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Camera {
    /// Create a new camera at the default demo viewpoint: behind and above
    /// the table, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        // Eye (0, 4, -4): on the -Z side, 45 degrees up.
        let yaw = 180.0_f32.to_radians();
        let pitch = 45.0_f32.to_radians();
        let distance = 32.0_f32.sqrt();
        let target = Vec3::ZERO;

        let mut camera = Self {
            position: Vec3::ZERO,
            target,
            up: Vec3::Y,
            fov: 45.0_f32.to_radians(),
            aspect,
            near: 0.01,
            far: 1000.0,
            yaw,
            pitch,
            distance,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * 0.002;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(0.05, 1000.0);
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * 2.5).max(1.0);
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Convert screen coordinates to a world-space ray origin and direction.
    ///
    /// The direction is not normalized; a degenerate unprojection yields a
    /// near-zero vector the caller must reject.
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> (Vec3, Vec3) {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        let inv_proj = self.projection_matrix().inverse();
        let inv_view = self.view_matrix().inverse();

        // Near and far points in NDC
        let near_ndc = glam::Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_ndc = glam::Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        // Transform to view space
        let near_view = inv_proj * near_ndc;
        let far_view = inv_proj * far_ndc;
        let near_view = near_view.truncate() / near_view.w;
        let far_view = far_view.truncate() / far_view.w;

        // Transform to world space
        let near_world = (inv_view * near_view.extend(1.0)).truncate();
        let far_world = (inv_view * far_view.extend(1.0)).truncate();

        (near_world, far_world - near_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_sits_behind_and_above() {
        let camera = Camera::new(1.0);
        assert!((camera.position - Vec3::new(0.0, 4.0, -4.0)).length() < 1e-4);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_center_pixel_ray_points_at_target() {
        let camera = Camera::new(1.0);
        let (origin, direction) = camera.screen_to_ray(400.0, 300.0, 800.0, 600.0);

        let view_dir = (camera.target - camera.position).normalize();
        assert!(direction.normalize().dot(view_dir) > 0.999);
        // The near plane lies between the eye and the target.
        assert!((origin - camera.position).length() < camera.distance);
    }

    #[test]
    fn test_fit_all_centers_the_target() {
        let mut camera = Camera::new(1.0);
        camera.fit_all(Vec3::new(1.0, 2.0, 3.0), 4.0);
        assert_eq!(camera.target, Vec3::new(1.0, 2.0, 3.0));
        assert!((camera.distance - 10.0).abs() < 1e-6);
    }
}
