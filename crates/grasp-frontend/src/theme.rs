//! UI theming

use serde::{Deserialize, Serialize};

/// Selectable UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// Apply the theme to the egui context.
pub fn apply_theme(ctx: &egui::Context, theme: UiTheme) {
    let visuals = match theme {
        UiTheme::Dark => dark_visuals(),
        UiTheme::Light => light_visuals(),
    };
    ctx.set_visuals(visuals);
}

fn dark_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(28, 28, 32);
    visuals.window_fill = egui::Color32::from_rgb(34, 34, 38);
    visuals.selection.bg_fill = egui::Color32::from_rgb(60, 90, 140);
    visuals
}

fn light_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = egui::Color32::from_rgb(240, 240, 243);
    visuals
}

/// Frame styling for viewport overlays.
pub fn overlay_frame(is_dark: bool) -> egui::Frame {
    let fill = if is_dark {
        egui::Color32::from_rgba_unmultiplied(20, 20, 24, 220)
    } else {
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 240)
    };
    egui::Frame::popup(&egui::Style::default())
        .fill(fill)
        .rounding(4.0)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(90)))
}
