//! Showcase mesh renderer
//!
//! Draws the optional decorative OBJ mesh with directional lighting and a
//! shadow map. The mesh is purely visual; it takes no part in ray casting
//! or grabbing.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use grasp_core::mesh::MeshData;

use crate::constants::shadow;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::PositionNormalVertex;

/// Per-mesh uniform: model transform and base color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshUniform {
    /// Model transformation matrix.
    pub model: [[f32; 4]; 4],
    /// Base color (RGBA).
    pub color: [f32; 4],
}

/// A mesh uploaded to the GPU, ready for rendering.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    /// Update the model transform and color.
    pub fn update(&self, queue: &wgpu::Queue, transform: Mat4, color: [f32; 4]) {
        let uniform = MeshUniform {
            model: transform.to_cols_array_2d(),
            color,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
    }
}

/// Renderer for the showcase mesh with lighting and shadows
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    mesh_bind_group_layout: wgpu::BindGroupLayout,
    camera_bind_group: wgpu::BindGroup,
}

impl MeshRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        shadow_light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let camera_bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Mesh");

        let mesh_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline = PipelineConfig::new(
            "Mesh",
            include_str!("../shaders/mesh.wgsl"),
            format,
            depth_format,
            &[
                camera_bind_group_layout,
                &mesh_bind_group_layout,
                light_bind_group_layout,
            ],
        )
        .with_vertex_layouts(vec![PositionNormalVertex::layout()])
        .with_cull_mode(Some(wgpu::Face::Back))
        .build(device);

        let shadow_pipeline = create_shadow_pipeline(
            device,
            shadow_light_bind_group_layout,
            &mesh_bind_group_layout,
        );

        Self {
            pipeline,
            shadow_pipeline,
            mesh_bind_group_layout,
            camera_bind_group,
        }
    }

    /// Upload mesh data to the GPU.
    pub fn upload(
        &self,
        device: &wgpu::Device,
        mesh: &MeshData,
        transform: Mat4,
        color: [f32; 4],
    ) -> GpuMesh {
        let vertices: Vec<PositionNormalVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(&position, &normal)| PositionNormalVertex { position, normal })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = MeshUniform {
            model: transform.to_cols_array_2d(),
            color,
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Uniform Bind Group"),
            layout: &self.mesh_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    /// Renders the mesh into the main pass.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        mesh: &'a GpuMesh,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &mesh.bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    /// Renders the mesh into the shadow map.
    pub fn render_shadow<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        mesh: &'a GpuMesh,
        shadow_light_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.shadow_pipeline);
        render_pass.set_bind_group(0, shadow_light_bind_group, &[]);
        render_pass.set_bind_group(1, &mesh.bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

/// Depth-only pipeline for the shadow pass
fn create_shadow_pipeline(
    device: &wgpu::Device,
    shadow_light_bind_group_layout: &wgpu::BindGroupLayout,
    mesh_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/shadow.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[shadow_light_bind_group_layout, mesh_bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Shadow Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[PositionNormalVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: shadow::SHADOW_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            // Bias pushes depths away from the light to avoid shadow acne.
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
