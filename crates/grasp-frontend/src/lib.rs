//! Grasp Frontend
//!
//! egui-based application for the grab-and-drag geometry sandbox.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::GraspApp;
pub use config::AppConfig;
pub use state::{AppAction, AppState, SharedAppState};
