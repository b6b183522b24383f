//! File I/O action handlers

use std::path::PathBuf;

use grasp_core::{Snapshot, load_obj};

use crate::state::AppAction;

use super::ActionContext;

/// Handle file-related actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::SaveSnapshot(path) => handle_save_snapshot(path, ctx),
        AppAction::LoadSnapshot(path) => handle_load_snapshot(path, ctx),
        AppAction::LoadShowcaseMesh(path) => handle_load_mesh(path, ctx),
        _ => {}
    }
}

fn handle_save_snapshot(path: Option<PathBuf>, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    let save_path = path.or(state.snapshot_path.clone());

    if let Some(ref path) = save_path {
        match state.snapshot().save(path) {
            Ok(()) => {
                tracing::info!("Saved snapshot to {:?}", path);
                state.snapshot_path = Some(path.clone());
                state.modified = false;
            }
            Err(e) => {
                tracing::error!("Failed to save snapshot: {}", e);
            }
        }
    }
}

fn handle_load_snapshot(path: PathBuf, ctx: &ActionContext) {
    match Snapshot::load(&path) {
        Ok(snapshot) => {
            tracing::info!(
                "Loaded snapshot from {:?} ({} boxes)",
                path,
                snapshot.scene.boxes().len()
            );
            ctx.app_state.lock().apply_snapshot(snapshot, Some(path));
        }
        Err(e) => {
            tracing::error!("Failed to load snapshot: {}", e);
        }
    }
}

fn handle_load_mesh(path: PathBuf, ctx: &ActionContext) {
    match load_obj(&path) {
        Ok(mesh) => {
            tracing::info!(
                "Loaded mesh from {:?} ({} vertices, {} triangles)",
                path,
                mesh.positions.len(),
                mesh.indices.len() / 3
            );
            if let Some(viewport_state) = ctx.viewport_state {
                let state = ctx.app_state.lock();
                viewport_state.lock().set_showcase(&mesh, &state);
            } else {
                tracing::warn!("viewport_state is None - cannot upload showcase mesh");
            }
        }
        Err(e) => {
            tracing::error!("Failed to load mesh: {}", e);
        }
    }
}
