//! Properties panel
//!
//! Scene generation parameters, interaction settings, and rendering
//! options. Scene edits only take effect through the Regenerate button;
//! the rest applies live.

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState, SharedViewportState};

/// Properties panel
pub struct PropertiesPanel {}

impl PropertiesPanel {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for PropertiesPanel {
    fn name(&self) -> &str {
        "Properties"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            self.scene_section(ui, app_state);
            ui.separator();
            self.interaction_section(ui, app_state);
            ui.separator();
            self.mesh_section(ui, app_state);
        });
    }

    fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        _render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            self.scene_section(ui, app_state);
            ui.separator();
            self.interaction_section(ui, app_state);
            ui.separator();
            self.mesh_section(ui, app_state);
            ui.separator();
            rendering_section(ui, viewport_state);
        });
    }
}

impl PropertiesPanel {
    fn scene_section(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.heading("Scene");

        let mut state = app_state.lock();
        let params = &mut state.params;

        egui::Grid::new("scene_params")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Room width");
                ui.add(egui::Slider::new(&mut params.room_width, 2.0..=20.0).suffix(" m"));
                ui.end_row();

                ui.label("Room depth");
                ui.add(egui::Slider::new(&mut params.room_depth, 2.0..=20.0).suffix(" m"));
                ui.end_row();

                ui.label("Room height");
                ui.add(egui::Slider::new(&mut params.room_height, 2.0..=6.0).suffix(" m"));
                ui.end_row();

                ui.label("Walls");
                ui.checkbox(&mut params.walls, "");
                ui.end_row();

                ui.label("Ceiling");
                ui.checkbox(&mut params.ceiling, "");
                ui.end_row();

                ui.label("Table width");
                ui.add(egui::Slider::new(&mut params.table_width, 0.5..=3.0).suffix(" m"));
                ui.end_row();

                ui.label("Table height");
                ui.add(egui::Slider::new(&mut params.table_height, 0.3..=1.5).suffix(" m"));
                ui.end_row();

                ui.label("Table depth");
                ui.add(egui::Slider::new(&mut params.table_depth, 0.5..=2.0).suffix(" m"));
                ui.end_row();

                ui.label("Movable boxes");
                ui.add(egui::Slider::new(&mut params.movable_count, 1..=200));
                ui.end_row();

                ui.label("Seed");
                ui.add(egui::DragValue::new(&mut params.seed));
                ui.end_row();
            });

        let params = *params;
        drop(state);

        if ui.button("Regenerate scene").clicked() {
            app_state
                .lock()
                .queue_action(AppAction::RegenerateScene(params));
        }
    }

    fn interaction_section(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.heading("Interaction");

        let mut state = app_state.lock();

        egui::Grid::new("interaction_params")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Ray length");
                ui.add(egui::Slider::new(&mut state.ray_length, 0.1..=10.0).suffix(" m"));
                ui.end_row();

                ui.label("Marker radius");
                ui.add(
                    egui::Slider::new(&mut state.marker_radius, 0.001..=0.05)
                        .logarithmic(true)
                        .suffix(" m"),
                );
                ui.end_row();

                ui.label("Info board");
                ui.checkbox(&mut state.show_info_board, "");
                ui.end_row();
            });

        drop(state);

        if ui.button("Reset interactions").clicked() {
            app_state.lock().queue_action(AppAction::ResetInteractions);
        }
    }

    fn mesh_section(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.heading("Showcase mesh");

        let mut state = app_state.lock();

        egui::Grid::new("mesh_params").num_columns(2).show(ui, |ui| {
            ui.label("Scale");
            ui.add(
                egui::Slider::new(&mut state.mesh_scale, 0.0001..=1.0)
                    .logarithmic(true),
            );
            ui.end_row();

            ui.label("Location");
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut state.mesh_location.x).speed(0.01));
                ui.add(egui::DragValue::new(&mut state.mesh_location.y).speed(0.01));
                ui.add(egui::DragValue::new(&mut state.mesh_location.z).speed(0.01));
            });
            ui.end_row();
        });

        drop(state);

        if ui.button("Remove mesh").clicked() {
            app_state.lock().queue_action(AppAction::ClearShowcaseMesh);
        }
    }
}

fn rendering_section(ui: &mut egui::Ui, viewport_state: &SharedViewportState) {
    ui.heading("Rendering");

    let mut state = viewport_state.lock();
    let light = state.renderer.light_mut();

    egui::Grid::new("rendering_params")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Shadows");
            ui.checkbox(&mut light.shadows_enabled, "");
            ui.end_row();

            ui.label("Intensity");
            ui.add(egui::Slider::new(&mut light.intensity, 0.0..=3.0));
            ui.end_row();

            ui.label("Ambient");
            ui.add(egui::Slider::new(&mut light.ambient_strength, 0.0..=1.0));
            ui.end_row();

            ui.label("Shadow softness");
            ui.add(egui::Slider::new(&mut light.shadow_softness, 0.0..=4.0));
            ui.end_row();
        });
}
