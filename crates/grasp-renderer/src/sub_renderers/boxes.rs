//! Instanced oriented-box renderer
//!
//! Draws every scene box as an instanced unit cube, scaled and offset by
//! the box's local extents and posed by its world translation/rotation.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use grasp_core::geometry::SceneBox;

use crate::constants::instances;
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::{PositionNormalVertex, mat4_instance_attributes};

/// Box instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BoxInstance {
    /// Model transformation matrix.
    pub model: [[f32; 4]; 4],
    /// Instance color (RGBA).
    pub color: [f32; 4],
    /// Selection state (0 = none, 1 = hovered or grabbed).
    pub selected: u32,
    /// Padding for alignment.
    pub _pad: [u32; 3],
}

impl BoxInstance {
    /// Builds the instance for a scene box.
    ///
    /// The unit cube spans ±0.5, so the model matrix scales by the local
    /// size, recenters on the local center, then applies the world pose.
    pub fn from_scene_box(b: &SceneBox, selected: bool) -> Self {
        let local = b.local();
        let model = Mat4::from_translation(b.translation)
            * Mat4::from_quat(b.rotation)
            * Mat4::from_translation(local.center())
            * Mat4::from_scale(local.size());
        Self {
            model: model.to_cols_array_2d(),
            color: b.color(),
            selected: selected as u32,
            _pad: [0; 3],
        }
    }
}

/// Renderer for all scene boxes (static and movable)
pub struct BoxRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: InstanceBuffer<BoxInstance>,
    bind_group: wgpu::BindGroup,
}

impl BoxRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Box");

        // Instance buffer layout: Mat4 + color + selected flag
        let mat4_attrs = mat4_instance_attributes(2);
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                mat4_attrs[0],
                mat4_attrs[1],
                mat4_attrs[2],
                mat4_attrs[3],
                wgpu::VertexAttribute {
                    offset: 64,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 80,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        };

        let pipeline = PipelineConfig::new(
            "Box",
            include_str!("../shaders/boxes.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![PositionNormalVertex::layout(), instance_layout])
        .with_cull_mode(Some(wgpu::Face::Back))
        .build(device);

        let (vertices, indices) = generate_unit_cube();
        let index_count = indices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instances = InstanceBuffer::new(device, "Box", instances::MAX_BOXES);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count,
            instances,
            bind_group,
        }
    }

    /// Update box instances
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[BoxInstance]) {
        self.instances.update(queue, instances);
    }

    /// Renders all box instances.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instances.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.slice());
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instances.count());
    }
}

/// Generate a unit cube (±0.5) with per-face normals
fn generate_unit_cube() -> (Vec<PositionNormalVertex>, Vec<u32>) {
    // One quad per face, outward normal, counter-clockwise winding.
    const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +X
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
                [0.5, -0.5, 0.5],
            ],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, -0.5],
            ],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, -0.5],
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, 0.5],
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
            ],
        ),
        // +Z
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in FACES {
        let base = vertices.len() as u32;
        for position in corners {
            vertices.push(PositionNormalVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3, Vec4};
    use grasp_core::geometry::Aabb;

    #[test]
    fn test_cube_has_24_vertices_36_indices() {
        let (vertices, indices) = generate_unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for v in &vertices {
            for c in v.position {
                assert!(c.abs() == 0.5);
            }
        }
    }

    #[test]
    fn test_instance_model_maps_unit_cube_to_box_corners() {
        let b = SceneBox::new(
            Aabb::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 4.0, 2.0)),
            Vec3::new(10.0, 0.0, 0.0),
            [1.0, 1.0, 1.0, 1.0],
        )
        .with_rotation(Quat::from_rotation_y(0.7));

        let instance = BoxInstance::from_scene_box(&b, false);
        let model = Mat4::from_cols_array_2d(&instance.model);

        // The unit cube's max corner must land on the world-space max corner.
        let mapped = (model * Vec4::new(0.5, 0.5, 0.5, 1.0)).truncate();
        let expected = b.to_world(b.local().max);
        assert!((mapped - expected).length() < 1e-4);
    }
}
