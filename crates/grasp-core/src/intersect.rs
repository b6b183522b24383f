//! Ray intersection tests against scene geometry.
//!
//! These are pure functions: they take the geometry by reference and
//! return hit information without touching any shared state.

use glam::{Quat, Vec3};

use crate::geometry::{Aabb, Plane, Ray};

/// A ray/box intersection result in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxHit {
    /// Ray parameter at the hit (world distance, since rays are unit length).
    pub distance: f32,
    /// Hit point in world space.
    pub point: Vec3,
    /// Outward face normal at the hit, in world space.
    pub normal: Vec3,
}

/// Ray-oriented-box intersection test.
///
/// The box is given by its local extents plus a world pose. The ray is
/// transformed into the box local frame (translation removed, then the
/// inverse rotation applied), tested against the extents axis by axis,
/// and the resulting hit is mapped back to world space.
///
/// # Arguments
///
/// * `ray` - The world-space ray.
/// * `local` - Box extents in the local frame.
/// * `translation` - World translation of the box.
/// * `rotation` - World rotation of the box (unit quaternion).
/// * `epsilon` - Threshold below which a direction component counts as
///   parallel to the slab planes of its axis.
///
/// # Returns
///
/// * `Some(hit)` - Distance, world hit point, and world face normal of the
///   nearest intersection in front of the ray origin. An origin inside the
///   box reports the exit face.
/// * `None` - If the ray misses the box or the box lies behind the origin.
pub fn intersect_ray_box(
    ray: &Ray,
    local: &Aabb,
    translation: Vec3,
    rotation: Quat,
    epsilon: f32,
) -> Option<BoxHit> {
    let inv_rotation = rotation.inverse();
    let origin = inv_rotation * (ray.origin() - translation);
    let direction = inv_rotation * ray.direction();

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;
    let mut exit_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < epsilon {
            // Parallel to this slab pair: miss unless the origin lies between them.
            if o < local.min[axis] || o > local.max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (local.min[axis] - o) * inv;
        let mut t1 = (local.max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            enter_axis = axis;
        }
        if t1 < t_exit {
            t_exit = t1;
            exit_axis = axis;
        }
    }

    if t_exit < 0.0 || t_enter > t_exit {
        return None;
    }

    // An origin inside the box has a negative entry parameter; report the
    // exit face instead so the distance stays non-negative.
    let (t, axis, sign) = if t_enter < 0.0 {
        (t_exit, exit_axis, direction[exit_axis].signum())
    } else {
        (t_enter, enter_axis, -direction[enter_axis].signum())
    };

    let local_point = origin + t * direction;
    let mut local_normal = Vec3::ZERO;
    local_normal[axis] = sign;

    Some(BoxHit {
        distance: t,
        point: rotation * local_point + translation,
        normal: rotation * local_normal,
    })
}

/// Ray-plane intersection test.
///
/// Returns the ray parameter of the hit, or `None` when the ray is
/// parallel to the plane or the plane lies behind the origin.
pub fn intersect_ray_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = ray.direction().dot(plane.normal);
    if denom.abs() < f32::EPSILON {
        return None;
    }

    let t = (plane.origin - ray.origin()).dot(plane.normal) / denom;
    if t < 0.0 { None } else { Some(t) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INTERSECT_EPSILON;

    fn unit_box() -> Aabb {
        Aabb::from_half_extents(Vec3::splat(0.5))
    }

    #[test]
    fn test_ray_hits_box_center() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        )
        .unwrap();

        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_box_behind_origin_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_origin_inside_box_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        )
        .unwrap();

        assert!((hit.distance - 0.5).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_rotated_box_hit() {
        // Quarter turn about Y swaps the X and Z extents as seen from the ray.
        let local = Aabb::from_half_extents(Vec3::new(0.5, 0.25, 0.1));
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();

        let hit =
            intersect_ray_box(&ray, &local, Vec3::ZERO, rotation, INTERSECT_EPSILON).unwrap();

        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_translated_box_hit() {
        let translation = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(Vec3::new(1.0, 2.0, -5.0), Vec3::Z).unwrap();

        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            translation,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        )
        .unwrap();

        assert!((hit.point - Vec3::new(1.0, 2.0, 2.5)).length() < 1e-5);
        assert!((hit.distance - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_to_slab_inside_extents() {
        // Direction has a zero X component; the origin sits inside the X slab.
        let ray = Ray::new(Vec3::new(0.2, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        );
        assert!(hit.is_some());

        // Same direction, but the origin is outside the X slab.
        let ray = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hit = intersect_ray_box(
            &ray,
            &unit_box(),
            Vec3::ZERO,
            Quat::IDENTITY,
            INTERSECT_EPSILON,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_hits_plane() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let t = intersect_ray_plane(&ray, &plane).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_to_plane_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X).unwrap();
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        assert!(intersect_ray_plane(&ray, &plane).is_none());
    }

    #[test]
    fn test_plane_behind_origin_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::Y).unwrap();
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        assert!(intersect_ray_plane(&ray, &plane).is_none());
    }
}
