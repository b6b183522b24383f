//! Main application module

mod dock;
mod menu;

use std::sync::Arc;

use egui_dock::{DockArea, DockState, Style};
use parking_lot::Mutex;

use crate::actions::{ActionContext, dispatch_action};
use crate::config::AppConfig;
use crate::state::{SharedAppState, SharedViewportState, ViewportState, create_shared_state};
use crate::theme::apply_theme;

pub use dock::{GraspTabViewer, PanelType, create_dock_layout};
pub use menu::{MenuAction, render_menu_bar};

/// Main application
pub struct GraspApp {
    dock_state: DockState<PanelType>,
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
    config: AppConfig,
    show_about: bool,
}

impl GraspApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load(cc.storage);
        apply_theme(&cc.egui_ctx, config.theme);

        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = render_state.device.clone();
            let queue = render_state.queue.clone();
            let format = render_state.target_format;

            let mut viewport = ViewportState::new(device.clone(), queue, format);
            viewport.renderer.apply_config(&device, &config.renderer);

            Arc::new(Mutex::new(viewport))
        });

        Self {
            dock_state: create_dock_layout(),
            app_state: create_shared_state(),
            viewport_state,
            config,
            show_about: false,
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state, &self.viewport_state);

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }
}

impl eframe::App for GraspApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Process pending actions
        self.process_actions();

        // Menu bar
        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state) {
            match menu_action {
                MenuAction::ResetLayout => {
                    self.dock_state = create_dock_layout();
                }
                MenuAction::SetTheme(theme) => {
                    self.config.theme = theme;
                    apply_theme(ctx, theme);
                }
                MenuAction::ShowAbout => {
                    self.show_about = true;
                }
            }
        }

        if self.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_about)
                .show(ctx, |ui| {
                    ui.label(format!("Grasp v{}", env!("CARGO_PKG_VERSION")));
                    ui.label("An interactive grab-and-drag geometry sandbox.");
                    ui.add_space(4.0);
                    ui.label("Toggle interact mode with C, grab with the mouse,");
                    ui.label("or drive a second controller from the pose simulator.");
                });
        }

        // Dock area
        let render_state = frame.wgpu_render_state();

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(
                ctx,
                &mut GraspTabViewer {
                    app_state: &self.app_state,
                    render_state,
                    viewport_state: &self.viewport_state,
                },
            );
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Fold live renderer tweaks back into the persisted config
        if let Some(viewport_state) = &self.viewport_state {
            let state = viewport_state.lock();
            let light = state.renderer.light();
            self.config.renderer.lighting.intensity = light.intensity;
            self.config.renderer.lighting.ambient_strength = light.ambient_strength;
            self.config.renderer.lighting.shadows_enabled = light.shadows_enabled;
            self.config.renderer.lighting.shadow_softness = light.shadow_softness;
        }
        self.config.save(storage);
    }
}
