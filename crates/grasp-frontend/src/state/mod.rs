//! Application state module

mod viewport;

pub use viewport::{SharedViewportState, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use parking_lot::Mutex;

use grasp_core::interaction::InputEvent;
use grasp_core::scene::{Scene, SceneParams};
use grasp_core::{
    DEFAULT_MARKER_RADIUS, DEFAULT_MESH_LOCATION, DEFAULT_MESH_SCALE, DEFAULT_RAY_LENGTH,
    Interactions, Snapshot,
};

/// Actions that can be performed on the app state
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Rebuild the scene from the given parameters
    RegenerateScene(SceneParams),
    /// Drop all grabs, contacts, and rays
    ResetInteractions,

    // File actions (path-based, native only)
    /// Save a scene snapshot
    SaveSnapshot(Option<PathBuf>),
    /// Load a scene snapshot
    LoadSnapshot(PathBuf),
    /// Load a showcase OBJ mesh
    LoadShowcaseMesh(PathBuf),

    // File actions (bytes-based, for WASM)
    /// Load a scene snapshot from bytes
    LoadSnapshotBytes { name: String, data: Vec<u8> },
    /// Load a showcase OBJ mesh from bytes
    LoadShowcaseMeshBytes { name: String, data: Vec<u8> },

    /// Remove the showcase mesh
    ClearShowcaseMesh,
}

/// Application state
pub struct AppState {
    /// Parameters the current scene was built from
    pub params: SceneParams,
    /// The live scene
    pub scene: Scene,
    /// Controller interaction service
    pub interactions: Interactions,
    /// Snapshot file path
    pub snapshot_path: Option<PathBuf>,
    /// Has unsaved changes
    pub modified: bool,
    /// Pending actions
    pending_actions: Vec<AppAction>,
    /// Visualized ray length
    pub ray_length: f32,
    /// Contact marker radius
    pub marker_radius: f32,
    /// Showcase mesh scale factor
    pub mesh_scale: f32,
    /// Showcase mesh placement
    pub mesh_location: Vec3,
    /// Show the contact info board overlay
    pub show_info_board: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let params = SceneParams::default();
        Self {
            scene: Scene::build_demo(&params),
            params,
            interactions: Interactions::new(),
            snapshot_path: None,
            modified: false,
            pending_actions: Vec::new(),
            ray_length: DEFAULT_RAY_LENGTH,
            marker_radius: DEFAULT_MARKER_RADIUS,
            mesh_scale: DEFAULT_MESH_SCALE,
            mesh_location: Vec3::from_array(DEFAULT_MESH_LOCATION),
            show_info_board: true,
        }
    }
}

impl AppState {
    /// Create a new app state with the default demo scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input event to the interaction service.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.interactions.handle_event(&mut self.scene, event);
        self.modified = true;
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Rebuild the scene from parameters, dropping interaction state.
    pub fn regenerate_scene(&mut self, params: SceneParams) {
        self.scene = Scene::build_demo(&params);
        self.params = params;
        self.interactions.reset();
        self.snapshot_path = None;
        self.modified = false;
    }

    /// Replace the scene from a loaded snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot, path: Option<PathBuf>) {
        self.params = snapshot.params;
        self.scene = snapshot.scene;
        self.interactions.reset();
        self.snapshot_path = path;
        self.modified = false;
    }

    /// Capture the current scene as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.params, self.scene.clone())
    }

    /// World transform of the showcase mesh.
    pub fn mesh_transform(&self) -> Mat4 {
        Mat4::from_translation(self.mesh_location) * Mat4::from_scale(Vec3::splat(self.mesh_scale))
    }

    /// Movable box indices currently under a contact, for highlighting.
    pub fn highlighted_boxes(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .interactions
            .contacts()
            .iter()
            .map(|c| c.box_index)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state() -> SharedAppState {
    Arc::new(Mutex::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regenerate_resets_interactions_and_path() {
        let mut state = AppState::new();
        state.snapshot_path = Some(PathBuf::from("old.grasp"));
        state.modified = true;

        let params = SceneParams {
            movable_count: 5,
            ..SceneParams::default()
        };
        state.regenerate_scene(params);

        assert_eq!(state.scene.movable_boxes().len(), 5);
        assert!(state.snapshot_path.is_none());
        assert!(!state.modified);
        assert!(state.interactions.contacts().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip_through_state() {
        let mut state = AppState::new();
        let snapshot = state.snapshot();
        let boxes = state.scene.boxes().len();

        state.regenerate_scene(SceneParams {
            movable_count: 1,
            ..SceneParams::default()
        });
        assert_ne!(state.scene.boxes().len(), boxes);

        state.apply_snapshot(snapshot, Some(PathBuf::from("test.grasp")));
        assert_eq!(state.scene.boxes().len(), boxes);
        assert_eq!(state.snapshot_path, Some(PathBuf::from("test.grasp")));
    }
}
