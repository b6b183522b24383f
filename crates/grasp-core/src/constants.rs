//! Global constants for grasp-core

/// Slab-test epsilon guarding division by near-zero ray components
pub const INTERSECT_EPSILON: f32 = 1e-6;

/// Number of controller slots (slot 0 is driven by the mouse)
pub const CONTROLLER_SLOTS: usize = 4;

/// Default length of the visualized controller rays, in meters
pub const DEFAULT_RAY_LENGTH: f32 = 2.0;

/// Default contact marker radius, in meters
pub const DEFAULT_MARKER_RADIUS: f32 = 0.005;

/// Default uniform scale applied to the showcase mesh
pub const DEFAULT_MESH_SCALE: f32 = 0.001;

/// Default world position of the showcase mesh
pub const DEFAULT_MESH_LOCATION: [f32; 3] = [0.0, 1.1, 0.0];

/// Default camera eye position
pub const DEFAULT_EYE: [f32; 3] = [0.0, 4.0, -4.0];

/// Depth offset accumulated per wheel tick while a grab is active
pub const WHEEL_OFFSET_STEP: f32 = 0.1;

/// Pointer delta to rotation angle gain for the rotation drag, in degrees
/// per pixel
pub const DRAG_ROTATION_GAIN: f32 = 2.0;
