//! Grasp Core Data Structures and Interaction Logic
//!
//! This crate contains the GPU- and UI-free core of the sandbox:
//! - Geometry: rays, planes, oriented boxes
//! - Intersection: ray/box and ray/plane tests
//! - Interaction: contact registry, controller state machine, grab updates
//! - Scene: demo layout construction
//! - Snapshot: scene save/load

pub mod constants;
pub mod geometry;
pub mod interaction;
pub mod intersect;
pub mod mesh;
pub mod project;
pub mod scene;

pub use constants::*;
pub use geometry::*;
pub use interaction::{ControllerState, Interactions, POINTER_CONTROLLER};
pub use intersect::*;
pub use mesh::*;
pub use project::*;
pub use scene::*;
