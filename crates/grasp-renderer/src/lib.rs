//! Grasp Renderer
//!
//! wgpu-based viewport rendering for the grasp sandbox:
//! - Orbit camera and ground grid
//! - Instanced scene boxes with selection highlighting
//! - Controller rays and contact markers
//! - Shadow-mapped showcase mesh

pub mod camera;
pub mod config;
pub mod constants;
pub mod grid;
pub mod instanced;
pub mod light;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use config::RendererConfig;
pub use light::DirectionalLight;
pub use renderer::{DisplayOptions, Renderer};
pub use sub_renderers::ray_color;
