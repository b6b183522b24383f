//! Sub-renderers for each viewport concern.

pub mod boxes;
pub mod marker;
pub mod mesh;
pub mod ray;

pub use boxes::{BoxInstance, BoxRenderer};
pub use marker::{MarkerInstance, MarkerRenderer};
pub use mesh::{GpuMesh, MeshRenderer};
pub use ray::{RayInstance, RayRenderer, ray_color};
