//! Viewport rendering state

use std::sync::Arc;

use parking_lot::Mutex;

use grasp_core::mesh::MeshData;
use grasp_renderer::Renderer;

use crate::state::AppState;

/// Color of the showcase mesh.
const MESH_COLOR: [f32; 4] = [0.8, 0.75, 0.65, 1.0];

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    format: wgpu::TextureFormat,
    render_texture: Option<RenderTexture>,
}

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600);
        Self {
            renderer,
            device,
            queue,
            format,
            render_texture: None,
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        let needs_recreate = self
            .render_texture
            .as_ref()
            .is_none_or(|t| t.width != width || t.height != height);

        if needs_recreate {
            // Free old texture if exists
            if let Some(old) = self.render_texture.take() {
                egui_renderer.free_texture(&old.egui_texture_id);
            }

            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Viewport Render Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: self.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

            let egui_texture_id = egui_renderer.register_native_texture(
                &self.device,
                &view,
                wgpu::FilterMode::Linear,
            );

            self.renderer.resize(&self.device, width, height);

            self.render_texture = Some(RenderTexture {
                texture,
                view,
                egui_texture_id,
                width,
                height,
            });
        }

        self.render_texture.as_ref().unwrap().egui_texture_id
    }

    /// Push the app state's scene and interaction data to the GPU.
    pub fn sync(&mut self, state: &AppState) {
        self.renderer
            .update_scene(&self.queue, &state.scene, &state.highlighted_boxes());
        self.renderer.update_interactions(
            &self.queue,
            &state.interactions,
            state.ray_length,
            state.marker_radius,
        );
        self.renderer
            .update_showcase(&self.queue, state.mesh_transform(), MESH_COLOR);
    }

    /// Upload a showcase mesh.
    pub fn set_showcase(&mut self, mesh: &MeshData, state: &AppState) {
        self.renderer
            .set_showcase_mesh(&self.device, mesh, state.mesh_transform(), MESH_COLOR);
    }

    /// Remove the showcase mesh.
    pub fn clear_showcase(&mut self) {
        self.renderer.clear_showcase_mesh();
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer.render(&self.queue, &mut encoder, &rt.view);

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

pub type SharedViewportState = Arc<Mutex<ViewportState>>;
