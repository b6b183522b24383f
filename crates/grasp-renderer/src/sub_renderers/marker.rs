//! Contact marker renderer
//!
//! Draws a small sphere at every registered contact point. Markers ride
//! along with grabbed boxes, so their positions are refreshed every frame
//! from the contact registry.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use grasp_core::interaction::ContactRecord;

use crate::constants::{instances, marker};
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::PositionNormalVertex;

/// Marker instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MarkerInstance {
    /// World-space center of the marker.
    pub position: [f32; 3],
    /// Sphere radius.
    pub radius: f32,
    /// Marker color (RGBA).
    pub color: [f32; 4],
}

impl MarkerInstance {
    /// Builds the instance for a contact record.
    pub fn from_contact(contact: &ContactRecord, radius: f32) -> Self {
        Self {
            position: contact.point.to_array(),
            radius,
            color: contact.color,
        }
    }
}

/// Renderer for contact point markers
pub struct MarkerRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: InstanceBuffer<MarkerInstance>,
    bind_group: wgpu::BindGroup,
}

impl MarkerRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Marker");

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        };

        let pipeline = PipelineConfig::new(
            "Marker",
            include_str!("../shaders/marker.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![PositionNormalVertex::layout(), instance_layout])
        .with_cull_mode(Some(wgpu::Face::Back))
        .build(device);

        let (vertices, indices) = generate_unit_sphere(marker::SEGMENTS, marker::RINGS);
        let index_count = indices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instances = InstanceBuffer::new(device, "Marker", instances::MAX_MARKERS);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count,
            instances,
            bind_group,
        }
    }

    /// Update marker instances
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[MarkerInstance]) {
        self.instances.update(queue, instances);
    }

    /// Clear all markers.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Renders all contact markers.
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

/// Generate a unit sphere via latitude/longitude tessellation
fn generate_unit_sphere(segments: u32, rings: u32) -> (Vec<PositionNormalVertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for segment in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();
            // Unit sphere: position doubles as the normal.
            vertices.push(PositionNormalVertex {
                position: [x, y, z],
                normal: [x, y, z],
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let i0 = ring * stride + segment;
            let i1 = i0 + stride;
            indices.extend_from_slice(&[i0, i1, i0 + 1, i0 + 1, i1, i1 + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_sphere_vertices_lie_on_unit_sphere() {
        let (vertices, indices) = generate_unit_sphere(8, 6);
        assert!(!indices.is_empty());
        for v in &vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_marker_instance_carries_contact_color() {
        let contact = ContactRecord {
            point: Vec3::new(0.1, 0.2, 0.3),
            color: [1.0, 0.0, 0.0, 1.0],
            box_index: 3,
            controller: 0,
        };
        let instance = MarkerInstance::from_contact(&contact, 0.005);
        assert_eq!(instance.position, [0.1, 0.2, 0.3]);
        assert_eq!(instance.radius, 0.005);
        assert_eq!(instance.color, contact.color);
    }
}
