//! Pose simulator panel
//!
//! Drives a tracked controller slot with synthetic pose samples, standing
//! in for real tracking hardware. Moving the sliders emits pose events
//! carrying the previous and current pose; the grab toggle emits grab
//! button events.

use glam::{EulerRot, Quat, Vec3};

use grasp_core::interaction::InputEvent;

use crate::panels::Panel;
use crate::state::SharedAppState;

/// Controller slot the simulator drives; slot 0 belongs to the mouse.
const SIMULATED_CONTROLLER: usize = 1;

/// Pose simulator panel
pub struct SimulatorPanel {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    grabbing: bool,
    last_position: Vec3,
    last_rotation: Quat,
}

impl SimulatorPanel {
    pub fn new() -> Self {
        // Start above the table, pointing down at the boxes.
        let position = Vec3::new(0.0, 1.6, -0.8);
        let pitch = -45.0_f32;
        Self {
            position,
            yaw: 0.0,
            pitch,
            roll: 0.0,
            grabbing: false,
            last_position: position,
            last_rotation: rotation_from_angles(0.0, pitch, 0.0),
        }
    }

    fn rotation(&self) -> Quat {
        rotation_from_angles(self.yaw, self.pitch, self.roll)
    }
}

fn rotation_from_angles(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

impl Default for SimulatorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for SimulatorPanel {
    fn name(&self) -> &str {
        "Pose simulator"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.label(format!("Controller slot {}", SIMULATED_CONTROLLER));
        ui.add_space(4.0);

        let mut changed = false;

        egui::Grid::new("pose_params").num_columns(2).show(ui, |ui| {
            ui.label("X");
            changed |= ui
                .add(egui::Slider::new(&mut self.position.x, -3.0..=3.0).suffix(" m"))
                .changed();
            ui.end_row();

            ui.label("Y");
            changed |= ui
                .add(egui::Slider::new(&mut self.position.y, 0.0..=3.0).suffix(" m"))
                .changed();
            ui.end_row();

            ui.label("Z");
            changed |= ui
                .add(egui::Slider::new(&mut self.position.z, -3.0..=3.0).suffix(" m"))
                .changed();
            ui.end_row();

            ui.label("Yaw");
            changed |= ui
                .add(egui::Slider::new(&mut self.yaw, -180.0..=180.0).suffix("\u{00b0}"))
                .changed();
            ui.end_row();

            ui.label("Pitch");
            changed |= ui
                .add(egui::Slider::new(&mut self.pitch, -90.0..=90.0).suffix("\u{00b0}"))
                .changed();
            ui.end_row();

            ui.label("Roll");
            changed |= ui
                .add(egui::Slider::new(&mut self.roll, -180.0..=180.0).suffix("\u{00b0}"))
                .changed();
            ui.end_row();
        });

        if changed {
            let rotation = self.rotation();
            app_state.lock().handle_event(InputEvent::Pose {
                controller: SIMULATED_CONTROLLER,
                last_position: self.last_position,
                last_rotation: self.last_rotation,
                position: self.position,
                rotation,
            });
            self.last_position = self.position;
            self.last_rotation = rotation;
        }

        ui.add_space(4.0);

        let mut grabbing = self.grabbing;
        if ui.toggle_value(&mut grabbing, "Grab").changed() {
            self.grabbing = grabbing;
            app_state.lock().handle_event(InputEvent::GrabButton {
                controller: SIMULATED_CONTROLLER,
                pressed: grabbing,
            });
        }

        if ui.button("Reset pose").clicked() {
            *self = Self::new();
            // Leave the slot's state to the next pose sample.
        }

        ui.add_space(8.0);

        let state = app_state.lock();
        let controller_state = state.interactions.controller_state(SIMULATED_CONTROLLER);
        ui.label(format!("State: {:?}", controller_state));
        let contact_count = state
            .interactions
            .contacts()
            .iter()
            .filter(|c| c.controller == SIMULATED_CONTROLLER)
            .count();
        ui.label(format!("Contacts: {}", contact_count));
    }
}
