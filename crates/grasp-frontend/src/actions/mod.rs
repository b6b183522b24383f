//! Action handling module
//!
//! Actions are queued in AppState and processed each frame.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod file_wasm;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

#[cfg(not(target_arch = "wasm32"))]
pub use file::handle_file_action;
#[cfg(target_arch = "wasm32")]
pub use file_wasm::handle_file_action_wasm;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    pub viewport_state: &'a Option<SharedViewportState>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        app_state: &'a SharedAppState,
        viewport_state: &'a Option<SharedViewportState>,
    ) -> Self {
        Self {
            app_state,
            viewport_state,
        }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::RegenerateScene(params) => {
            ctx.app_state.lock().regenerate_scene(params);
        }

        AppAction::ResetInteractions => {
            ctx.app_state.lock().interactions.reset();
        }

        AppAction::ClearShowcaseMesh => {
            if let Some(viewport_state) = ctx.viewport_state {
                viewport_state.lock().clear_showcase();
            }
        }

        // File actions (native only)
        #[cfg(not(target_arch = "wasm32"))]
        AppAction::SaveSnapshot(_) | AppAction::LoadSnapshot(_) | AppAction::LoadShowcaseMesh(_) => {
            handle_file_action(action, ctx);
        }

        #[cfg(target_arch = "wasm32")]
        AppAction::SaveSnapshot(_) | AppAction::LoadSnapshot(_) | AppAction::LoadShowcaseMesh(_) => {
            tracing::warn!("Path-based file actions are not supported in WASM");
        }

        // Bytes-based file actions (for WASM)
        #[cfg(target_arch = "wasm32")]
        AppAction::LoadSnapshotBytes { .. } | AppAction::LoadShowcaseMeshBytes { .. } => {
            handle_file_action_wasm(action, ctx);
        }

        #[cfg(not(target_arch = "wasm32"))]
        AppAction::LoadSnapshotBytes { .. } | AppAction::LoadShowcaseMeshBytes { .. } => {
            tracing::warn!("Bytes-based file actions are primarily for WASM");
        }
    }
}
