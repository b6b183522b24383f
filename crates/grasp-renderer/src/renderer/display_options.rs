//! Viewport display toggles

/// What the viewport draws; all layers are on by default.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Draw the ground grid.
    pub show_grid: bool,
    /// Draw the controller rays.
    pub show_rays: bool,
    /// Draw the contact markers.
    pub show_markers: bool,
    /// Draw the showcase mesh.
    pub show_mesh: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_rays: true,
            show_markers: true,
            show_mesh: true,
        }
    }
}
