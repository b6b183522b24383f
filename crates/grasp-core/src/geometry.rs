//! Geometric primitives shared by the intersection engine and the scene.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A ray with a normalized direction.
///
/// Construction goes through [`Ray::new`], which rejects direction vectors
/// too short to normalize, so a `Ray` never carries NaN components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray from an origin and an arbitrary direction vector.
    ///
    /// Returns `None` if the direction is too short to normalize.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Returns the ray origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the normalized ray direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Returns the point at parameter `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// An infinite plane given by a point on it and its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub origin: Vec3,
    /// Unit normal of the plane.
    pub normal: Vec3,
}

impl Plane {
    /// Creates a plane from a point and a unit normal.
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self { origin, normal }
    }
}

/// Axis-aligned box extents in a local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new box from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box centered at the local origin with the given half-extents.
    pub fn from_half_extents(half_extents: Vec3) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    /// Creates a box spanning two opposite corners, in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size (full extents) of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the radius of the bounding sphere.
    pub fn radius(&self) -> f32 {
        (self.size() * 0.5).length()
    }
}

/// One oriented box in the scene.
///
/// The local extents and color are fixed at construction; only the world
/// pose (translation and rotation) changes over the box's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    local: Aabb,
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation (unit quaternion).
    pub rotation: Quat,
    color: [f32; 4],
}

impl SceneBox {
    /// Creates a box with identity rotation.
    pub fn new(local: Aabb, translation: Vec3, color: [f32; 4]) -> Self {
        Self {
            local,
            translation,
            rotation: Quat::IDENTITY,
            color,
        }
    }

    /// Sets the initial rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns the local extents.
    pub fn local(&self) -> Aabb {
        self.local
    }

    /// Returns the box color (RGBA).
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Maps a point from the box local frame to world space.
    pub fn to_world(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// Maps a point from world space into the box local frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_rejects_degenerate_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::ONE, Vec3::splat(1e-30)).is_none());
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(ray.direction(), Vec3::Z);
        assert_eq!(ray.point_at(3.0), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_aabb_from_corners_sorts_components() {
        let aabb = Aabb::from_corners(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_center_and_size() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 2.0, 6.0));
    }

    #[test]
    fn test_box_local_world_round_trip() {
        let b = SceneBox::new(
            Aabb::from_half_extents(Vec3::splat(0.5)),
            Vec3::new(1.0, 2.0, 3.0),
            [1.0, 1.0, 1.0, 1.0],
        )
        .with_rotation(Quat::from_rotation_y(1.1) * Quat::from_rotation_x(0.4));

        let p = Vec3::new(0.2, -0.1, 0.4);
        let round_trip = b.to_local(b.to_world(p));
        assert!((round_trip - p).length() < 1e-5);
    }
}
