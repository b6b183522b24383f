//! Render pass execution
//!
//! The frame is two passes: a depth-only shadow pass from the light's
//! viewpoint, then the main pass into the (optionally multisampled)
//! viewport target.

use crate::grid::GridRenderer;
use crate::renderer::display_options::DisplayOptions;
use crate::renderer::lighting_system::LightingSystem;
use crate::sub_renderers::{BoxRenderer, GpuMesh, MarkerRenderer, MeshRenderer, RayRenderer};

/// Inputs for the shadow pass.
pub struct ShadowPassParams<'a> {
    pub lighting: &'a LightingSystem,
    pub mesh_renderer: &'a MeshRenderer,
    pub mesh: Option<&'a GpuMesh>,
}

/// Render the shadow map. Clears to maximum depth even when there is
/// nothing to draw, so stale shadows never linger.
pub fn run_shadow_pass(encoder: &mut wgpu::CommandEncoder, params: ShadowPassParams<'_>) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Shadow Pass"),
        color_attachments: &[],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.lighting.shadow_view(),
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if let Some(mesh) = params.mesh {
        params
            .mesh_renderer
            .render_shadow(&mut pass, mesh, params.lighting.shadow_bind_group());
    }
}

/// Inputs for the main viewport pass.
pub struct MainPassParams<'a> {
    pub color_view: &'a wgpu::TextureView,
    pub msaa_view: Option<&'a wgpu::TextureView>,
    pub depth_view: &'a wgpu::TextureView,
    pub clear_color: wgpu::Color,
    pub options: DisplayOptions,
    pub grid: &'a GridRenderer,
    pub boxes: &'a BoxRenderer,
    pub rays: &'a RayRenderer,
    pub markers: &'a MarkerRenderer,
    pub mesh_renderer: &'a MeshRenderer,
    pub mesh: Option<&'a GpuMesh>,
    pub light_bind_group: &'a wgpu::BindGroup,
}

/// Render the scene into the viewport.
pub fn run_main_pass(encoder: &mut wgpu::CommandEncoder, params: MainPassParams<'_>) {
    // With MSAA the multisampled texture is the render target and the
    // viewport texture receives the resolve.
    let (view, resolve_target) = match params.msaa_view {
        Some(msaa) => (msaa, Some(params.color_view)),
        None => (params.color_view, None),
    };

    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Main Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(params.clear_color),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if params.options.show_grid {
        params.grid.render(&mut pass);
    }

    if params.options.show_mesh {
        if let Some(mesh) = params.mesh {
            params
                .mesh_renderer
                .render(&mut pass, mesh, params.light_bind_group);
        }
    }

    params.boxes.render(&mut pass);

    if params.options.show_rays {
        params.rays.render(&mut pass);
    }

    if params.options.show_markers {
        params.markers.render(&mut pass);
    }
}
