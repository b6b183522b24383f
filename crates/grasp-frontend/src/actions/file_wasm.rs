//! WASM file I/O action handlers

use grasp_core::{Snapshot, load_obj_from_bytes};

use crate::state::AppAction;

use super::ActionContext;

/// Handle WASM file-related actions (bytes-based)
pub fn handle_file_action_wasm(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::LoadSnapshotBytes { name, data } => {
            handle_load_snapshot_bytes(&name, &data, ctx)
        }
        AppAction::LoadShowcaseMeshBytes { name, data } => {
            handle_load_mesh_bytes(&name, &data, ctx)
        }
        _ => {}
    }
}

fn handle_load_snapshot_bytes(name: &str, data: &[u8], ctx: &ActionContext) {
    match Snapshot::load_from_bytes(data) {
        Ok(snapshot) => {
            tracing::info!(
                "Loaded snapshot from bytes: {} ({} boxes)",
                name,
                snapshot.scene.boxes().len()
            );
            // No file path in the browser sandbox.
            ctx.app_state.lock().apply_snapshot(snapshot, None);
        }
        Err(e) => {
            tracing::error!("Failed to load snapshot from bytes: {}", e);
        }
    }
}

fn handle_load_mesh_bytes(name: &str, data: &[u8], ctx: &ActionContext) {
    match load_obj_from_bytes(data) {
        Ok(mesh) => {
            tracing::info!(
                "Loaded mesh from bytes: {} ({} vertices, {} triangles)",
                name,
                mesh.positions.len(),
                mesh.indices.len() / 3
            );
            if let Some(viewport_state) = ctx.viewport_state {
                let state = ctx.app_state.lock();
                viewport_state.lock().set_showcase(&mesh, &state);
            }
        }
        Err(e) => {
            tracing::error!("Failed to load mesh from bytes: {}", e);
        }
    }
}
