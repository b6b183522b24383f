//! Scene construction: the room, table, environment clutter, and the
//! movable boxes the controllers can grab.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Dimensions of the demo scene, all in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    /// Room width along X.
    pub room_width: f32,
    /// Room depth along Z.
    pub room_depth: f32,
    /// Room height along Y.
    pub room_height: f32,
    /// Floor/wall thickness.
    pub wall_thickness: f32,
    /// Whether to build the walls.
    pub walls: bool,
    /// Whether to build the ceiling.
    pub ceiling: bool,
    /// Table top width along X.
    pub table_width: f32,
    /// Table top height above the floor.
    pub table_height: f32,
    /// Table top depth along Z.
    pub table_depth: f32,
    /// Table leg width.
    pub leg_width: f32,
    /// Number of movable boxes scattered on the table.
    pub movable_count: usize,
    /// Seed for the deterministic layout generator.
    pub seed: u64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            room_width: 5.0,
            room_depth: 7.0,
            room_height: 3.0,
            wall_thickness: 0.2,
            walls: false,
            ceiling: false,
            table_width: 1.6,
            table_height: 0.8,
            table_depth: 0.9,
            leg_width: 0.03,
            movable_count: 20,
            seed: 0x5eed,
        }
    }
}

use crate::geometry::{Aabb, SceneBox};

/// The box collection the interaction core runs against.
///
/// Static boxes (room, table, environment) come first in the collection;
/// the movable boxes follow from `movable_start` on. Contact records index
/// into the movable range, so its start is part of the scene state and
/// survives snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    boxes: Vec<SceneBox>,
    movable_start: usize,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default demo layout: room, table, environment clutter,
    /// and the movable boxes on the table top.
    pub fn build_demo(params: &SceneParams) -> Self {
        let mut scene = Scene::new();
        let mut rng = LayoutRng::new(params.seed);

        scene.add_room(params);
        scene.add_table(params);
        scene.add_environment(params, &mut rng);
        scene.add_movable_boxes(params, &mut rng);

        info!(
            boxes = scene.boxes.len(),
            movable = scene.movable_boxes().len(),
            "built demo scene"
        );
        scene
    }

    /// All boxes, static and movable.
    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    /// The static boxes (room, table, environment).
    pub fn static_boxes(&self) -> &[SceneBox] {
        &self.boxes[..self.movable_start]
    }

    /// The movable boxes; contact records index into this slice.
    pub fn movable_boxes(&self) -> &[SceneBox] {
        &self.boxes[self.movable_start..]
    }

    /// Mutable view of the movable boxes for the transform updaters.
    pub fn movable_boxes_mut(&mut self) -> &mut [SceneBox] {
        &mut self.boxes[self.movable_start..]
    }

    /// Appends a static box. Static boxes must all be added before the
    /// first movable one.
    pub fn push_static_box(&mut self, b: SceneBox) {
        debug_assert_eq!(self.movable_start, self.boxes.len());
        self.boxes.push(b);
        self.movable_start = self.boxes.len();
    }

    /// Appends a movable box.
    pub fn push_movable_box(&mut self, b: SceneBox) {
        self.boxes.push(b);
    }

    /// Center and radius of a sphere enclosing every box, for camera
    /// fitting. `None` for an empty scene.
    pub fn bounding_sphere(&self) -> Option<(Vec3, f32)> {
        let first = self.boxes.first()?;
        let mut min = first.translation + first.local().min;
        let mut max = first.translation + first.local().max;
        for b in &self.boxes {
            // Conservative: the local radius covers any rotation.
            let r = Vec3::splat(b.local().radius());
            let center = b.translation + b.local().center();
            min = min.min(center - r);
            max = max.max(center + r);
        }
        let center = (min + max) * 0.5;
        Some((center, (max - center).length()))
    }

    /// Floor slab spanning the room footprint, plus walls and ceiling when
    /// enabled.
    fn add_room(&mut self, p: &SceneParams) {
        let (w, d, h, t) = (p.room_width, p.room_depth, p.room_height, p.wall_thickness);
        let floor_color = [0.2, 0.2, 0.2, 1.0];

        self.push_static_box(SceneBox::new(
            Aabb::from_corners(
                Vec3::new(-0.5 * w - t, -t, -0.5 * d - t),
                Vec3::new(0.5 * w + t, 0.0, 0.5 * d + t),
            ),
            Vec3::ZERO,
            floor_color,
        ));

        if p.walls {
            let wall_color = [0.8, 0.5, 0.5, 1.0];
            self.push_static_box(SceneBox::new(
                Aabb::from_corners(
                    Vec3::new(-0.5 * w, -t, -0.5 * d - t),
                    Vec3::new(0.5 * w, h, -0.5 * d),
                ),
                Vec3::ZERO,
                wall_color,
            ));
            self.push_static_box(SceneBox::new(
                Aabb::from_corners(
                    Vec3::new(-0.5 * w, -t, 0.5 * d),
                    Vec3::new(0.5 * w, h, 0.5 * d + t),
                ),
                Vec3::ZERO,
                wall_color,
            ));
            self.push_static_box(SceneBox::new(
                Aabb::from_corners(
                    Vec3::new(0.5 * w, -t, -0.5 * d - t),
                    Vec3::new(0.5 * w + t, h, 0.5 * d + t),
                ),
                Vec3::ZERO,
                [0.5, 0.8, 0.5, 1.0],
            ));
        }
        if p.ceiling {
            self.push_static_box(SceneBox::new(
                Aabb::from_corners(
                    Vec3::new(-0.5 * w - t, h, -0.5 * d - t),
                    Vec3::new(0.5 * w + t, h + t, 0.5 * d + t),
                ),
                Vec3::ZERO,
                [0.5, 0.5, 0.8, 1.0],
            ));
        }
    }

    /// Table top plus four legs, in brown.
    fn add_table(&mut self, p: &SceneParams) {
        let (tw, td, th, leg) = (p.table_width, p.table_depth, p.table_height, p.leg_width);
        let table_color = [0.3, 0.2, 0.0, 1.0];

        self.push_static_box(SceneBox::new(
            Aabb::from_corners(
                Vec3::new(-0.5 * tw - 2.0 * leg, th, -0.5 * td - 2.0 * leg),
                Vec3::new(0.5 * tw + 2.0 * leg, th + leg, 0.5 * td + 2.0 * leg),
            ),
            Vec3::ZERO,
            table_color,
        ));

        for (sx, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.push_static_box(SceneBox::new(
                Aabb::from_corners(
                    Vec3::new(sx * 0.5 * tw, 0.0, sz * 0.5 * td),
                    Vec3::new(sx * (0.5 * tw + leg), th, sz * (0.5 * td + leg)),
                ),
                Vec3::ZERO,
                table_color,
            ));
        }
    }

    /// A grid of blocks surrounding the room footprint, rising with
    /// distance from the room and a per-cell random factor.
    fn add_environment(&mut self, p: &SceneParams, rng: &mut LayoutRng) {
        let step = 0.2;
        let extent_w = 3.0 * p.room_width;
        let extent_d = 3.0 * p.room_depth;
        let (w, d) = (p.room_width, p.room_depth);

        let n = (extent_w / step) as usize;
        let m = (extent_d / step) as usize;
        for i in 0..n {
            let x = i as f32 * step - 0.5 * extent_w;
            for j in 0..m {
                let z = j as f32 * step - 0.5 * extent_d;
                // Skip cells inside the room footprint.
                if (x + 0.5 * step > -0.5 * w && x < 0.5 * w)
                    && (z + 0.5 * step > -0.5 * d && z < 0.5 * d)
                {
                    continue;
                }
                let rise = (x.abs() - 0.5 * w).max(0.0) + (z.abs() - 0.5 * d).max(0.0);
                let h = 0.2 * rise * rng.uniform() + 0.1;
                self.push_static_box(SceneBox::new(
                    Aabb::from_corners(Vec3::new(x, 0.0, z), Vec3::new(x + step, h, z + step)),
                    Vec3::ZERO,
                    [
                        0.3 * rng.uniform() + 0.3,
                        0.3 * rng.uniform() + 0.2,
                        0.2 * rng.uniform() + 0.1,
                        1.0,
                    ],
                ));
            }
        }
    }

    /// Small randomly-sized, randomly-colored, randomly-oriented boxes
    /// scattered over the table top.
    fn add_movable_boxes(&mut self, p: &SceneParams, rng: &mut LayoutRng) {
        let (tw, td, th, leg) = (p.table_width, p.table_depth, p.table_height, p.leg_width);
        for _ in 0..p.movable_count {
            let x = rng.uniform();
            let z = rng.uniform();
            let extent =
                (Vec3::new(rng.uniform(), rng.uniform(), rng.uniform()) + 0.1) * tw.min(td) * 0.2;
            let color = [rng.uniform(), rng.uniform(), rng.uniform(), 1.0];

            let rotation = Quat::from_xyzw(
                rng.signed_uniform(),
                rng.signed_uniform(),
                rng.signed_uniform(),
                rng.signed_uniform(),
            )
            .normalize();

            self.push_movable_box(
                SceneBox::new(
                    Aabb::from_half_extents(0.5 * extent),
                    Vec3::new(-0.5 * tw + x * tw, th + leg, -0.5 * td + z * td),
                    color,
                )
                .with_rotation(rotation),
            );
        }
    }
}

/// Small deterministic generator for the scene layout (SplitMix64).
///
/// Layout randomness only has to look irregular and reproduce exactly for
/// a given seed; it never feeds anything security sensitive.
#[derive(Debug, Clone)]
struct LayoutRng {
    state: u64,
}

impl LayoutRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn uniform(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [-1, 1).
    fn signed_uniform(&mut self) -> f32 {
        2.0 * self.uniform() - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_is_reproducible() {
        let params = SceneParams::default();
        let a = Scene::build_demo(&params);
        let b = Scene::build_demo(&params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_demo_scene_has_movable_boxes_on_the_table() {
        let params = SceneParams::default();
        let scene = Scene::build_demo(&params);

        assert_eq!(scene.movable_boxes().len(), params.movable_count);
        assert!(!scene.static_boxes().is_empty());
        assert_eq!(
            scene.boxes().len(),
            scene.static_boxes().len() + scene.movable_boxes().len()
        );

        let top = params.table_height + params.leg_width;
        for b in scene.movable_boxes() {
            assert!((b.translation.y - top).abs() < 1e-6);
            assert!(b.translation.x.abs() <= 0.5 * params.table_width + 1e-6);
            assert!(b.translation.z.abs() <= 0.5 * params.table_depth + 1e-6);
            assert!(b.rotation.is_normalized());
        }
    }

    #[test]
    fn test_movable_boxes_get_independent_color_channels() {
        let scene = Scene::build_demo(&SceneParams::default());

        // Colors draw one uniform per channel, so the layout is not all grey.
        assert!(scene.movable_boxes().iter().any(|b| {
            let [r, g, b, _] = b.color();
            r != g || g != b
        }));
    }

    #[test]
    fn test_environment_skips_the_room_footprint() {
        let params = SceneParams::default();
        let scene = Scene::build_demo(&params);

        // Every static box beyond the floor and table (6 boxes) is an
        // environment block; none may overlap the room interior.
        for b in scene.static_boxes().iter().skip(6) {
            let min = b.local().min;
            let max = b.local().max;
            let inside_x = max.x > -0.5 * params.room_width && min.x < 0.5 * params.room_width;
            let inside_z = max.z > -0.5 * params.room_depth && min.z < 0.5 * params.room_depth;
            assert!(!(inside_x && inside_z), "environment block inside the room");
        }
    }

    #[test]
    fn test_bounding_sphere_covers_all_boxes() {
        let scene = Scene::build_demo(&SceneParams::default());
        let (center, radius) = scene.bounding_sphere().unwrap();

        for b in scene.boxes() {
            let box_center = b.translation + b.local().center();
            assert!((box_center - center).length() <= radius + 1e-4);
        }
    }

    #[test]
    fn test_empty_scene_has_no_bounding_sphere() {
        assert!(Scene::new().bounding_sphere().is_none());
    }

    #[test]
    fn test_different_seeds_give_different_layouts() {
        let mut params = SceneParams::default();
        let a = Scene::build_demo(&params);
        params.seed = 7;
        let b = Scene::build_demo(&params);
        assert_ne!(a, b);
    }
}
