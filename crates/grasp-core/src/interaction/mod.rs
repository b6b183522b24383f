//! Controller interaction: ray casting, hover/grab state, and the
//! transform updates driven by pointer drags and controller poses.

pub mod event;
pub mod grab;
pub mod registry;

use glam::{Quat, Vec3};
use tracing::debug;

use crate::constants::{CONTROLLER_SLOTS, INTERSECT_EPSILON, WHEEL_OFFSET_STEP};
use crate::geometry::{Plane, Ray};
use crate::intersect::intersect_ray_box;
use crate::scene::Scene;

pub use event::{InputEvent, PointerButton};
pub use registry::{ContactRecord, ContactRegistry};

use grab::{DragAnchor, PoseDelta, drag_rotation};

/// The controller slot the mouse pointer drives, for either button.
pub const POINTER_CONTROLLER: usize = 0;

/// Interaction state of one controller slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// The controller ray hits nothing.
    #[default]
    Idle,
    /// The ray hits at least one box; contact records are live.
    Hovering,
    /// Pose and drag input move the recorded boxes.
    Grabbed,
}

#[derive(Debug, Default)]
struct ControllerSlot {
    state: ControllerState,
    ray: Option<Ray>,
    grab_button: Option<PointerButton>,
    drag_plane: Option<Plane>,
    drag_anchor: Option<DragAnchor>,
    offset: f32,
}

/// The interaction service.
///
/// The host owns the scene and the event loop; it feeds events here one at
/// a time and reads back contact records, per-slot states, and rays for
/// rendering. The service holds no reference to the scene and draws
/// nothing itself, so a host composes it into its own state as a plain
/// field.
#[derive(Debug)]
pub struct Interactions {
    registry: ContactRegistry,
    slots: [ControllerSlot; CONTROLLER_SLOTS],
    interact_mode: bool,
    epsilon: f32,
}

impl Default for Interactions {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactions {
    /// Creates the service with every slot idle and pointer routing off,
    /// leaving the pointer to camera navigation until toggled.
    pub fn new() -> Self {
        Self {
            registry: ContactRegistry::new(),
            slots: Default::default(),
            interact_mode: false,
            epsilon: INTERSECT_EPSILON,
        }
    }

    /// Handles one input event against the live scene.
    ///
    /// Pointer events are dropped while interact mode is off; pose events
    /// always go through.
    pub fn handle_event(&mut self, scene: &mut Scene, event: InputEvent) {
        match event {
            InputEvent::ToggleInteract => {
                self.interact_mode = !self.interact_mode;
                debug!(interact_mode = self.interact_mode, "interact mode toggled");
            }
            InputEvent::PointerPress { button, ray, focus } if self.interact_mode => {
                self.pointer_press(scene, button, ray, focus);
            }
            InputEvent::PointerDrag { button, ray, delta } if self.interact_mode => {
                self.pointer_drag(scene, button, ray, delta);
            }
            InputEvent::PointerRelease { button, ray } if self.interact_mode => {
                self.pointer_release(scene, button, ray);
            }
            InputEvent::Wheel { delta } if self.interact_mode => {
                self.wheel(scene, delta);
            }
            InputEvent::Pose {
                controller,
                last_position,
                last_rotation,
                position,
                rotation,
            } => {
                self.pose(
                    scene,
                    controller,
                    last_position,
                    last_rotation,
                    position,
                    rotation,
                );
            }
            InputEvent::GrabButton { controller, pressed } => {
                self.grab_button(scene, controller, pressed);
            }
            _ => {}
        }
    }

    /// Live contact records, for markers and the info board.
    pub fn contacts(&self) -> &[ContactRecord] {
        self.registry.records()
    }

    /// Interaction state of one controller slot.
    pub fn controller_state(&self, controller: usize) -> ControllerState {
        self.slots[controller].state
    }

    /// The last ray cast by a controller, for ray visualization.
    pub fn controller_ray(&self, controller: usize) -> Option<Ray> {
        self.slots[controller].ray
    }

    /// Whether pointer events currently reach the core.
    pub fn interact_mode(&self) -> bool {
        self.interact_mode
    }

    /// Forgets all records, rays, and grabs, e.g. after replacing the scene.
    pub fn reset(&mut self) {
        self.registry.clear();
        for slot in &mut self.slots {
            *slot = ControllerSlot::default();
        }
    }

    fn pointer_press(
        &mut self,
        scene: &mut Scene,
        button: PointerButton,
        ray: Option<Ray>,
        focus: Vec3,
    ) {
        // One grab gesture per controller; a second button is ignored
        // until the first is released.
        if self.slots[POINTER_CONTROLLER].state == ControllerState::Grabbed {
            return;
        }

        self.recast(scene, POINTER_CONTROLLER, ray);

        // Grab trigger: only a hover can take it. A press over empty space
        // stays idle.
        if self.slots[POINTER_CONTROLLER].state != ControllerState::Hovering {
            return;
        }
        let Some(ray) = ray else { return };

        debug!(?button, "pointer grab started");
        let slot = &mut self.slots[POINTER_CONTROLLER];
        slot.state = ControllerState::Grabbed;
        slot.grab_button = Some(button);
        slot.offset = 0.0;
        // The drag plane faces the viewer through the camera focus for the
        // whole grab. The press ray pins the initial anchor so a wheel
        // event before any drag still has a position to work from.
        slot.drag_plane = (focus - ray.origin())
            .try_normalize()
            .map(|normal| Plane::new(focus, normal));
        slot.drag_anchor = slot
            .drag_plane
            .and_then(|plane| DragAnchor::from_ray(&ray, &plane));
    }

    fn pointer_drag(
        &mut self,
        scene: &mut Scene,
        button: PointerButton,
        ray: Option<Ray>,
        delta: glam::Vec2,
    ) {
        let slot = &self.slots[POINTER_CONTROLLER];
        if slot.state != ControllerState::Grabbed || slot.grab_button != Some(button) {
            return;
        }

        match button {
            PointerButton::Primary => {
                let Some(ray) = ray else { return };
                let Some(plane) = slot.drag_plane else { return };
                let Some(anchor) = DragAnchor::from_ray(&ray, &plane) else {
                    return;
                };
                self.slots[POINTER_CONTROLLER].drag_anchor = Some(anchor);
                self.apply_anchor(scene, POINTER_CONTROLLER);
            }
            PointerButton::Secondary => {
                let rotation = drag_rotation(delta);
                for record in self.registry.iter_controller(POINTER_CONTROLLER) {
                    let b = &mut scene.movable_boxes_mut()[record.box_index];
                    b.rotation = rotation * b.rotation;
                }
            }
        }
    }

    fn pointer_release(&mut self, scene: &mut Scene, button: PointerButton, ray: Option<Ray>) {
        let slot = &self.slots[POINTER_CONTROLLER];
        if slot.state != ControllerState::Grabbed || slot.grab_button != Some(button) {
            return;
        }

        self.end_grab(POINTER_CONTROLLER);
        self.recast(scene, POINTER_CONTROLLER, ray);
    }

    fn wheel(&mut self, scene: &mut Scene, delta: f32) {
        if self.slots[POINTER_CONTROLLER].state != ControllerState::Grabbed {
            return;
        }
        self.slots[POINTER_CONTROLLER].offset += WHEEL_OFFSET_STEP * delta;
        self.apply_anchor(scene, POINTER_CONTROLLER);
    }

    fn pose(
        &mut self,
        scene: &mut Scene,
        controller: usize,
        last_position: Vec3,
        last_rotation: Quat,
        position: Vec3,
        rotation: Quat,
    ) {
        if self.slots[controller].state == ControllerState::Grabbed {
            let delta = PoseDelta::between(last_position, last_rotation, position, rotation);
            for record in self.registry.iter_controller_mut(controller) {
                let b = &mut scene.movable_boxes_mut()[record.box_index];
                let (translation, new_rotation) = delta.apply_to_pose(b.translation, b.rotation);
                b.translation = translation;
                b.rotation = new_rotation;
                // Keep the contact marker glued to the moving surface.
                record.point = delta.apply_to_point(record.point);
            }
            self.slots[controller].ray = pose_ray(position, rotation);
        } else {
            self.recast(scene, controller, pose_ray(position, rotation));
        }
    }

    fn grab_button(&mut self, scene: &mut Scene, controller: usize, pressed: bool) {
        match self.slots[controller].state {
            // Grabbing requires an existing hover; pressing while idle is
            // a no-op, and pressing while grabbed is ignored.
            ControllerState::Hovering if pressed => {
                debug!(controller, "controller grab started");
                self.slots[controller].state = ControllerState::Grabbed;
            }
            ControllerState::Grabbed if !pressed => {
                debug!(controller, "controller grab released");
                self.end_grab(controller);
                let ray = self.slots[controller].ray;
                self.recast(scene, controller, ray);
            }
            _ => {}
        }
    }

    /// Purges the slot's records, casts a fresh ray against the movable
    /// boxes, and settles the slot between Idle and Hovering.
    fn recast(&mut self, scene: &Scene, controller: usize, ray: Option<Ray>) {
        self.registry.remove_for_controller(controller);
        self.slots[controller].ray = ray;

        let mut any_hit = false;
        if let Some(ray) = ray {
            let color = contact_color(controller);
            for (box_index, b) in scene.movable_boxes().iter().enumerate() {
                if let Some(hit) =
                    intersect_ray_box(&ray, &b.local(), b.translation, b.rotation, self.epsilon)
                {
                    self.registry.insert(ContactRecord {
                        point: hit.point,
                        color,
                        box_index,
                        controller,
                    });
                    any_hit = true;
                }
            }
        }

        let state = if any_hit {
            ControllerState::Hovering
        } else {
            ControllerState::Idle
        };
        if state != self.slots[controller].state {
            debug!(controller, ?state, "controller state changed");
        }
        self.slots[controller].state = state;
    }

    /// Pins every record of the controller (and its box) to the current
    /// drag anchor, pushed out by the accumulated wheel offset.
    fn apply_anchor(&mut self, scene: &mut Scene, controller: usize) {
        let Some(anchor) = self.slots[controller].drag_anchor else {
            return;
        };
        let position = anchor.position(self.slots[controller].offset);
        for record in self.registry.iter_controller_mut(controller) {
            scene.movable_boxes_mut()[record.box_index].translation = position;
            record.point = position;
        }
    }

    fn end_grab(&mut self, controller: usize) {
        let slot = &mut self.slots[controller];
        slot.grab_button = None;
        slot.drag_plane = None;
        slot.drag_anchor = None;
        slot.offset = 0.0;
    }
}

/// Controllers aim along the -Z axis of their local frame.
fn pose_ray(position: Vec3, rotation: Quat) -> Option<Ray> {
    Ray::new(position, rotation * Vec3::NEG_Z)
}

/// Marker color per controller: red for the pointer slot, blue for
/// tracked controllers.
fn contact_color(controller: usize) -> [f32; 4] {
    if controller == POINTER_CONTROLLER {
        [1.0, 0.0, 0.0, 1.0]
    } else {
        [0.0, 0.0, 1.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Aabb, SceneBox};

    fn test_scene() -> Scene {
        // Two unit boxes a meter apart on the X axis.
        let mut scene = Scene::new();
        scene.push_movable_box(SceneBox::new(
            Aabb::from_half_extents(Vec3::splat(0.5)),
            Vec3::ZERO,
            [1.0, 1.0, 1.0, 1.0],
        ));
        scene.push_movable_box(SceneBox::new(
            Aabb::from_half_extents(Vec3::splat(0.5)),
            Vec3::new(2.0, 0.0, 0.0),
            [1.0, 1.0, 1.0, 1.0],
        ));
        scene
    }

    fn ray_at_first_box() -> Option<Ray> {
        Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z)
    }

    fn ray_at_nothing() -> Option<Ray> {
        Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z)
    }

    fn pose_at(position: Vec3) -> InputEvent {
        InputEvent::Pose {
            controller: 1,
            last_position: position,
            last_rotation: Quat::IDENTITY,
            position,
            rotation: Quat::IDENTITY,
        }
    }

    fn interactive() -> Interactions {
        let mut interactions = Interactions::new();
        interactions.handle_event(&mut Scene::new(), InputEvent::ToggleInteract);
        interactions
    }

    #[test]
    fn test_press_passes_through_hovering_into_grab() {
        let mut scene = test_scene();
        let mut interactions = interactive();

        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Idle
        );

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );

        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Grabbed
        );
        assert_eq!(interactions.contacts().len(), 1);
        assert_eq!(interactions.contacts()[0].box_index, 0);
    }

    #[test]
    fn test_press_over_empty_space_stays_idle() {
        let mut scene = test_scene();
        let mut interactions = interactive();

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: ray_at_nothing(),
                focus: Vec3::ZERO,
            },
        );

        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Idle
        );
        assert!(interactions.contacts().is_empty());
    }

    #[test]
    fn test_grab_trigger_without_hover_is_a_noop() {
        let mut scene = test_scene();
        let mut interactions = Interactions::new();

        // No pose has been seen for slot 1, so there is no hover to take.
        interactions.handle_event(
            &mut scene,
            InputEvent::GrabButton {
                controller: 1,
                pressed: true,
            },
        );

        assert_eq!(interactions.controller_state(1), ControllerState::Idle);
    }

    #[test]
    fn test_pose_grab_needs_hover_first() {
        let mut scene = test_scene();
        let mut interactions = Interactions::new();

        // Aim slot 1 at the first box, grab, and confirm the two-step path.
        let aim = pose_at(Vec3::new(0.0, 0.0, 5.0));
        interactions.handle_event(&mut scene, aim);
        assert_eq!(interactions.controller_state(1), ControllerState::Hovering);

        interactions.handle_event(
            &mut scene,
            InputEvent::GrabButton {
                controller: 1,
                pressed: true,
            },
        );
        assert_eq!(interactions.controller_state(1), ControllerState::Grabbed);
    }

    #[test]
    fn test_pose_delta_translates_grabbed_box() {
        let mut scene = test_scene();
        let mut interactions = Interactions::new();

        interactions.handle_event(&mut scene, pose_at(Vec3::new(0.0, 0.0, 5.0)));
        interactions.handle_event(
            &mut scene,
            InputEvent::GrabButton {
                controller: 1,
                pressed: true,
            },
        );

        // Controller moves one unit along +X with no rotation change.
        interactions.handle_event(
            &mut scene,
            InputEvent::Pose {
                controller: 1,
                last_position: Vec3::new(0.0, 0.0, 5.0),
                last_rotation: Quat::IDENTITY,
                position: Vec3::new(1.0, 0.0, 5.0),
                rotation: Quat::IDENTITY,
            },
        );

        let moved = &scene.movable_boxes()[0];
        assert!((moved.translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!(moved.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert_eq!(interactions.controller_state(1), ControllerState::Grabbed);
    }

    #[test]
    fn test_release_keeps_other_controllers_records() {
        let mut scene = test_scene();
        let mut interactions = interactive();

        // Slot 1 hovers the second box.
        interactions.handle_event(
            &mut scene,
            InputEvent::Pose {
                controller: 1,
                last_position: Vec3::new(2.0, 0.0, 5.0),
                last_rotation: Quat::IDENTITY,
                position: Vec3::new(2.0, 0.0, 5.0),
                rotation: Quat::IDENTITY,
            },
        );
        assert_eq!(interactions.contacts().len(), 1);

        // The pointer grabs the first box, then releases over empty space.
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );
        assert_eq!(interactions.contacts().len(), 2);

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerRelease {
                button: PointerButton::Primary,
                ray: ray_at_nothing(),
            },
        );

        let contacts = interactions.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].controller, 1);
        assert_eq!(contacts[0].box_index, 1);
        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Idle
        );
    }

    #[test]
    fn test_drag_with_wheel_offset_moves_along_view_ray() {
        let mut scene = test_scene();
        let mut interactions = interactive();

        // Eye on -Z looking straight at the first box through the origin.
        let eye = Vec3::new(0.0, 0.0, -4.0);
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: Ray::new(eye, Vec3::Z),
                focus: Vec3::ZERO,
            },
        );
        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Grabbed
        );

        // Five wheel ticks accumulate an offset of 0.5 along the view ray.
        interactions.handle_event(&mut scene, InputEvent::Wheel { delta: 5.0 });

        // Drag so the pointer ray meets the drag plane at (0, 1, 0).
        let target = Vec3::new(0.0, 1.0, 0.0);
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerDrag {
                button: PointerButton::Primary,
                ray: Ray::new(eye, target - eye),
                delta: glam::Vec2::ZERO,
            },
        );

        // The drag plane passes through the focus facing the eye, so the
        // ray toward (0, 1, 0) pierces it exactly there; the offset pushes
        // the box further along that ray.
        let direction = (target - eye).normalize();
        let expected = target + 0.5 * direction;
        let moved = &scene.movable_boxes()[0];
        assert!((moved.translation - expected).length() < 1e-5);
        assert!((interactions.contacts()[0].point - expected).length() < 1e-5);
    }

    #[test]
    fn test_rotation_drag_left_multiplies() {
        let mut scene = test_scene();
        let start_rotation = Quat::from_rotation_x(0.2);
        scene.movable_boxes_mut()[0].rotation = start_rotation;

        let mut interactions = interactive();
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Secondary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );

        let delta = glam::Vec2::new(3.0, -2.0);
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerDrag {
                button: PointerButton::Secondary,
                ray: ray_at_first_box(),
                delta,
            },
        );

        let expected = drag_rotation(delta) * start_rotation;
        assert!(scene.movable_boxes()[0].rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_second_button_cannot_steal_a_grab() {
        let mut scene = test_scene();
        let mut interactions = interactive();

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );
        let records_before = interactions.contacts().len();

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Secondary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );

        assert_eq!(interactions.contacts().len(), records_before);

        // Releasing the ignored button leaves the grab in place too.
        interactions.handle_event(
            &mut scene,
            InputEvent::PointerRelease {
                button: PointerButton::Secondary,
                ray: ray_at_nothing(),
            },
        );
        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Grabbed
        );
    }

    #[test]
    fn test_pointer_events_ignored_until_toggled() {
        let mut scene = test_scene();
        let mut interactions = Interactions::new();

        interactions.handle_event(
            &mut scene,
            InputEvent::PointerPress {
                button: PointerButton::Primary,
                ray: ray_at_first_box(),
                focus: Vec3::ZERO,
            },
        );
        assert_eq!(
            interactions.controller_state(POINTER_CONTROLLER),
            ControllerState::Idle
        );
        assert!(interactions.contacts().is_empty());
    }

    #[test]
    fn test_hover_clears_when_ray_leaves() {
        let mut scene = test_scene();
        let mut interactions = Interactions::new();

        interactions.handle_event(&mut scene, pose_at(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(interactions.controller_state(1), ControllerState::Hovering);

        interactions.handle_event(&mut scene, pose_at(Vec3::new(0.0, 5.0, 5.0)));
        assert_eq!(interactions.controller_state(1), ControllerState::Idle);
        assert!(interactions.contacts().is_empty());
    }
}
