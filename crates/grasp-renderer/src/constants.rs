//! Rendering constants

/// Viewport constants
pub mod viewport {
    /// Default clear color (dark grey-blue)
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.15,
        g: 0.15,
        b: 0.18,
        a: 1.0,
    };

    /// MSAA sample count for the main pass
    pub const SAMPLE_COUNT: u32 = 4;
}

/// Shadow mapping constants
pub mod shadow {
    /// Default shadow map resolution
    pub const SHADOW_MAP_SIZE: u32 = 2048;
    /// Shadow map depth format
    pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}

/// Contact marker constants
pub mod marker {
    /// Sphere segments (longitude divisions)
    pub const SEGMENTS: u32 = 16;
    /// Sphere rings (latitude divisions)
    pub const RINGS: u32 = 12;
}

/// Instance buffer capacities
pub mod instances {
    /// Maximum number of scene boxes
    pub const MAX_BOXES: u32 = 8192;
    /// Maximum number of controller rays
    pub const MAX_RAYS: u32 = 8;
    /// Maximum number of contact markers
    pub const MAX_MARKERS: u32 = 256;
}

/// Ground grid constants
pub mod grid {
    /// Default grid half-extent
    pub const DEFAULT_SIZE: f32 = 10.0;
    /// Default grid line spacing
    pub const DEFAULT_SPACING: f32 = 1.0;
    /// Default grid line color
    pub const LINE_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
    /// X-axis line color
    pub const X_AXIS_COLOR: [f32; 3] = [0.8, 0.2, 0.2];
    /// Z-axis line color
    pub const Z_AXIS_COLOR: [f32; 3] = [0.2, 0.2, 0.8];
}
