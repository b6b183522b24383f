//! 3D Viewport panel
//!
//! Renders the scene texture and routes pointer input: camera navigation
//! by default, or the interaction core while interact mode is on (toggled
//! with the C key or the toolbar button).

use glam::Vec2;

use grasp_core::POINTER_CONTROLLER;
use grasp_core::geometry::Ray;
use grasp_core::interaction::{ControllerState, InputEvent, PointerButton};

use crate::panels::Panel;
use crate::state::{AppState, SharedAppState, SharedViewportState};
use crate::theme::overlay_frame;

/// Wheel points per interaction tick.
const WHEEL_TICK_POINTS: f32 = 50.0;

/// 3D viewport panel
pub struct ViewportPanel {
    last_size: egui::Vec2,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            last_size: egui::Vec2::ZERO,
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "Viewport"
    }

    fn needs_render_context(&self) -> bool {
        true
    }

    fn ui(&mut self, ui: &mut egui::Ui, _app_state: &SharedAppState) {
        // Fallback when no render context
        let available_size = ui.available_size();
        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "Viewport\n(WebGPU not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );

        self.last_size = available_size;
    }

    fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        // Toolbar
        ui.horizontal(|ui| {
            let mut interact = app_state.lock().interactions.interact_mode();
            if ui
                .toggle_value(&mut interact, "Interact (C)")
                .on_hover_text("Route the pointer to grabbing instead of the camera")
                .changed()
            {
                app_state.lock().handle_event(InputEvent::ToggleInteract);
            }

            if ui.button("Fit All").clicked() {
                let bounds = app_state.lock().scene.bounding_sphere();
                if let Some((center, radius)) = bounds {
                    viewport_state
                        .lock()
                        .renderer
                        .camera_mut()
                        .fit_all(center, radius);
                }
            }

            ui.separator();

            let mut state = viewport_state.lock();
            let options = state.renderer.display_options_mut();
            ui.checkbox(&mut options.show_grid, "Grid");
            ui.checkbox(&mut options.show_rays, "Rays");
            ui.checkbox(&mut options.show_markers, "Markers");
            ui.checkbox(&mut options.show_mesh, "Mesh");
        });

        // Main viewport area
        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        // Sync scene data, ensure texture, and render
        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.sync(&app_state.lock());
            state.render();
            tex_id
        };

        // Display the rendered texture
        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            ))
            .sense(egui::Sense::click_and_drag()),
        );

        // Mode toggle
        if response.hovered() && ui.input(|i| i.key_pressed(egui::Key::C)) {
            app_state.lock().handle_event(InputEvent::ToggleInteract);
        }

        let interact = app_state.lock().interactions.interact_mode();
        if interact {
            self.handle_interaction_input(ui, &response, available_size, app_state, viewport_state);
        } else {
            handle_camera_input(ui, &response, viewport_state);
        }

        // Middle mouse always navigates, even in interact mode.
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            viewport_state
                .lock()
                .renderer
                .camera_mut()
                .pan(delta.x, delta.y);
        }

        // Contact info board overlay
        let show_board = app_state.lock().show_info_board;
        if show_board {
            render_info_board(ui, response.rect, &app_state.lock());
        }

        self.last_size = available_size;
    }
}

impl ViewportPanel {
    /// Forward pointer input to the interaction core.
    fn handle_interaction_input(
        &mut self,
        ui: &mut egui::Ui,
        response: &egui::Response,
        size: egui::Vec2,
        app_state: &SharedAppState,
        viewport_state: &SharedViewportState,
    ) {
        let pointer_pos = response
            .hover_pos()
            .or(response.interact_pointer_pos())
            .map(|p| p - response.rect.min);

        let ray = pointer_pos.and_then(|pos| {
            let vp = viewport_state.lock();
            let (origin, direction) = vp
                .renderer
                .camera()
                .screen_to_ray(pos.x, pos.y, size.x, size.y);
            Ray::new(origin, direction)
        });
        let focus = viewport_state.lock().renderer.camera().target;

        let mut events: Vec<InputEvent> = Vec::new();
        ui.input(|i| {
            for (egui_button, button) in [
                (egui::PointerButton::Primary, PointerButton::Primary),
                (egui::PointerButton::Secondary, PointerButton::Secondary),
            ] {
                if response.hovered() && i.pointer.button_pressed(egui_button) {
                    events.push(InputEvent::PointerPress { button, ray, focus });
                }
                if i.pointer.button_down(egui_button) && i.pointer.delta() != egui::Vec2::ZERO {
                    let delta = Vec2::new(i.pointer.delta().x, i.pointer.delta().y);
                    events.push(InputEvent::PointerDrag { button, ray, delta });
                }
                if i.pointer.button_released(egui_button) {
                    events.push(InputEvent::PointerRelease { button, ray });
                }
            }

            if response.hovered() {
                let scroll = i.smooth_scroll_delta.y;
                if scroll != 0.0 {
                    events.push(InputEvent::Wheel {
                        delta: scroll / WHEEL_TICK_POINTS,
                    });
                }
            }
        });

        if !events.is_empty() {
            let mut state = app_state.lock();
            for event in events {
                state.handle_event(event);
            }
        }
    }
}

/// Orbit, pan, and zoom the camera from pointer input.
fn handle_camera_input(
    ui: &mut egui::Ui,
    response: &egui::Response,
    viewport_state: &SharedViewportState,
) {
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Secondary)
    {
        let delta = response.drag_delta();
        let sensitivity = 0.005;
        viewport_state
            .lock()
            .renderer
            .camera_mut()
            .orbit(-delta.x * sensitivity, delta.y * sensitivity);
    }

    if response.hovered() {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 {
            viewport_state
                .lock()
                .renderer
                .camera_mut()
                .zoom(scroll_delta * 0.01);
        }
    }
}

/// Overlay listing the interaction mode, per-controller states, and the
/// live contact records.
fn render_info_board(ui: &mut egui::Ui, rect: egui::Rect, state: &AppState) {
    let frame = overlay_frame(ui.visuals().dark_mode);
    let pos = rect.min + egui::vec2(8.0, 8.0);

    egui::Area::new(egui::Id::new("viewport_info_board"))
        .fixed_pos(pos)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            frame.show(ui, |ui| {
                ui.set_max_width(260.0);
                ui.strong("Info Board");

                let mode = if state.interactions.interact_mode() {
                    "interact"
                } else {
                    "camera"
                };
                ui.label(format!("Mode: {}", mode));

                let pointer_state = state.interactions.controller_state(POINTER_CONTROLLER);
                ui.label(format!("Pointer: {}", state_label(pointer_state)));

                let contacts = state.interactions.contacts();
                ui.label(format!("Contacts: {}", contacts.len()));
                for contact in contacts.iter().take(8) {
                    ui.small(format!(
                        "c{} box {} at ({:.2}, {:.2}, {:.2})",
                        contact.controller,
                        contact.box_index,
                        contact.point.x,
                        contact.point.y,
                        contact.point.z,
                    ));
                }
                if contacts.len() > 8 {
                    ui.small(format!("... and {} more", contacts.len() - 8));
                }
            });
        });
}

fn state_label(state: ControllerState) -> &'static str {
    match state {
        ControllerState::Idle => "idle",
        ControllerState::Hovering => "hovering",
        ControllerState::Grabbed => "grabbed",
    }
}
