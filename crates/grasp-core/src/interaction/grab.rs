//! Transform updates applied to grabbed boxes.
//!
//! Pure helpers: the service decides *when* to apply them, these decide
//! *what* the new transforms are.

use glam::{Quat, Vec2, Vec3};

use crate::constants::DRAG_ROTATION_GAIN;
use crate::geometry::{Plane, Ray};
use crate::intersect::intersect_ray_plane;

/// Rigid world-space delta between two controller poses.
///
/// Applying the delta to a point moves it exactly the way the controller
/// moved between the two samples.
#[derive(Debug, Clone, Copy)]
pub struct PoseDelta {
    rotation: Quat,
    last_position: Vec3,
    position: Vec3,
}

impl PoseDelta {
    /// Builds the delta taking the previous pose to the current one.
    pub fn between(
        last_position: Vec3,
        last_rotation: Quat,
        position: Vec3,
        rotation: Quat,
    ) -> Self {
        Self {
            rotation: rotation * last_rotation.inverse(),
            last_position,
            position,
        }
    }

    /// Maps a world-space point through the delta.
    pub fn apply_to_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point - self.last_position) + self.position
    }

    /// Maps a world-space pose through the delta.
    ///
    /// The incremental rotation lands on the left so it acts in world
    /// space, after the pose's existing orientation.
    pub fn apply_to_pose(&self, translation: Vec3, rotation: Quat) -> (Vec3, Quat) {
        (self.apply_to_point(translation), self.rotation * rotation)
    }
}

/// Where a screen drag last pinned the grabbed boxes.
#[derive(Debug, Clone, Copy)]
pub struct DragAnchor {
    /// Hit point of the pointer ray on the drag plane.
    pub point: Vec3,
    /// Direction from the eye through the hit point.
    pub direction: Vec3,
}

impl DragAnchor {
    /// Intersects a pointer ray with the drag plane.
    pub fn from_ray(ray: &Ray, plane: &Plane) -> Option<Self> {
        let t = intersect_ray_plane(ray, plane)?;
        Some(Self {
            point: ray.point_at(t),
            direction: ray.direction(),
        })
    }

    /// The translation the anchor pins grabbed boxes to: the plane hit
    /// pushed along the view ray by the accumulated wheel offset.
    pub fn position(&self, offset: f32) -> Vec3 {
        self.point + offset * self.direction
    }
}

/// Builds the incremental world-space rotation for a rotation drag.
///
/// Horizontal pointer motion turns about the world X axis and vertical
/// motion about world Y, each by twice the delta in degrees. The combined
/// rotation is meant to be left-multiplied onto a box's orientation.
pub fn drag_rotation(delta: Vec2) -> Quat {
    let rot_x = Quat::from_rotation_x((delta.x * DRAG_ROTATION_GAIN).to_radians());
    let rot_y = Quat::from_rotation_y((delta.y * DRAG_ROTATION_GAIN).to_radians());
    rot_x * rot_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_translation_delta() {
        let delta = PoseDelta::between(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
            Quat::IDENTITY,
        );

        let (translation, rotation) = delta.apply_to_pose(Vec3::ZERO, Quat::IDENTITY);
        assert!((translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_rotation_delta_orbits_about_controller() {
        // Controller stays at the origin and turns a quarter turn about Y;
        // a box one unit down +X swings to -Z and picks up the turn.
        let turn = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let delta = PoseDelta::between(Vec3::ZERO, Quat::IDENTITY, Vec3::ZERO, turn);

        let (translation, rotation) = delta.apply_to_pose(Vec3::X, Quat::IDENTITY);
        assert!((translation - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!(rotation.abs_diff_eq(turn, 1e-5));
    }

    #[test]
    fn test_delta_rotation_lands_on_the_left() {
        let existing = Quat::from_rotation_x(0.3);
        let turn = Quat::from_rotation_y(0.7);
        let delta = PoseDelta::between(Vec3::ZERO, Quat::IDENTITY, Vec3::ZERO, turn);

        let (_, rotation) = delta.apply_to_pose(Vec3::ZERO, existing);
        assert!(rotation.abs_diff_eq(turn * existing, 1e-6));
        assert!(!rotation.abs_diff_eq(existing * turn, 1e-4));
    }

    #[test]
    fn test_anchor_offset_along_view_ray() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, -4.0), Vec3::Z).unwrap();
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);

        let anchor = DragAnchor::from_ray(&ray, &plane).unwrap();
        assert!((anchor.point - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!((anchor.position(0.5) - Vec3::new(0.0, 1.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_drag_rotation_combines_x_before_y() {
        let delta = Vec2::new(10.0, 4.0);
        let rot_x = Quat::from_rotation_x(20.0_f32.to_radians());
        let rot_y = Quat::from_rotation_y(8.0_f32.to_radians());

        assert!(drag_rotation(delta).abs_diff_eq(rot_x * rot_y, 1e-6));
    }
}
