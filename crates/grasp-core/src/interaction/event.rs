//! Input events fed to the interaction service.

use glam::{Quat, Vec2, Vec3};

use crate::geometry::Ray;

/// Pointer buttons that can start and drive a grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Grabs and drags the hit boxes along the view-facing plane.
    Primary,
    /// Grabs and rotates the hit boxes.
    Secondary,
}

/// One host input event, handled strictly in delivery order.
///
/// Pointer events always address controller slot 0, for either button;
/// tracked controllers use their own slots. Rays are optional wherever the
/// host derives them from an unprojection that can fail with a degenerate
/// direction; a missing ray casts nothing and moves nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed: cast the ray, then grab whatever it hit.
    PointerPress {
        /// Button that went down.
        button: PointerButton,
        /// World ray from the eye through the pointer.
        ray: Option<Ray>,
        /// Camera focus point, anchoring the drag plane for this grab.
        focus: Vec3,
    },
    /// Pointer moved while a button is held.
    PointerDrag {
        /// Button held during the drag.
        button: PointerButton,
        /// World ray from the eye through the pointer.
        ray: Option<Ray>,
        /// Pointer movement since the previous drag event, in pixels.
        delta: Vec2,
    },
    /// Pointer button released: end the grab and re-evaluate the hit test.
    PointerRelease {
        /// Button that went up.
        button: PointerButton,
        /// World ray from the eye through the pointer, for re-evaluation.
        ray: Option<Ray>,
    },
    /// Wheel scrolled; adjusts the drag depth offset while grabbed.
    Wheel {
        /// Scroll delta in wheel ticks.
        delta: f32,
    },
    /// Tracked controller pose sample carrying the previous and current
    /// pose, from which the rigid delta is derived.
    Pose {
        /// Controller slot.
        controller: usize,
        /// Position at the previous sample.
        last_position: Vec3,
        /// Orientation at the previous sample.
        last_rotation: Quat,
        /// Current position.
        position: Vec3,
        /// Current orientation.
        rotation: Quat,
    },
    /// Tracked controller grab button went down or up.
    GrabButton {
        /// Controller slot.
        controller: usize,
        /// Whether the button is now held.
        pressed: bool,
    },
    /// Toggles whether pointer events reach the interaction core at all.
    ToggleInteract,
}
