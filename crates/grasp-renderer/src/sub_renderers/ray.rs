//! Controller ray renderer
//!
//! Draws each active controller's pointing ray as a line segment. The ray
//! color encodes the controller slot and its interaction state, so the two
//! hands (or the mouse) stay visually distinct while hovering and grabbing.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

use grasp_core::geometry::Ray;
use grasp_core::interaction::ControllerState;

use crate::constants::instances;
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::{PositionVertex, mat4_instance_attributes};

/// Ray instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RayInstance {
    /// Maps the unit +Z segment onto the ray.
    pub transform: [[f32; 4]; 4],
    /// Ray color (RGBA).
    pub color: [f32; 4],
}

impl RayInstance {
    /// Builds the instance for a controller ray of the given length.
    pub fn new(ray: &Ray, length: f32, color: [f32; 4]) -> Self {
        let transform = Mat4::from_translation(ray.origin())
            * Mat4::from_quat(Quat::from_rotation_arc(Vec3::Z, ray.direction()))
            * Mat4::from_scale(Vec3::splat(length));
        Self {
            transform: transform.to_cols_array_2d(),
            color,
        }
    }
}

/// Color for a controller's ray.
///
/// Red shifts to blue with the slot index; the green channel lifts while
/// hovering and saturates while grabbing.
pub fn ray_color(controller: usize, state: ControllerState) -> [f32; 4] {
    let ci = (controller as f32).min(1.0);
    let activity = match state {
        ControllerState::Idle => 0.0,
        ControllerState::Hovering => 1.0,
        ControllerState::Grabbed => 2.0,
    };
    [1.0 - ci, 0.5 * activity, ci, 1.0]
}

/// Renderer for controller rays
pub struct RayRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instances: InstanceBuffer<RayInstance>,
    bind_group: wgpu::BindGroup,
}

impl RayRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Ray");

        let mat4_attrs = mat4_instance_attributes(1);
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RayInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                mat4_attrs[0],
                mat4_attrs[1],
                mat4_attrs[2],
                mat4_attrs[3],
                wgpu::VertexAttribute {
                    offset: 64,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        };

        let pipeline = PipelineConfig::new(
            "Ray",
            include_str!("../shaders/ray.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![PositionVertex::layout(), instance_layout])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(device);

        // Unit segment along +Z; the instance transform poses and scales it.
        let vertices = [
            PositionVertex {
                position: [0.0, 0.0, 0.0],
            },
            PositionVertex {
                position: [0.0, 0.0, 1.0],
            },
        ];

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ray Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instances = InstanceBuffer::new(device, "Ray", instances::MAX_RAYS);

        Self {
            pipeline,
            vertex_buffer,
            instances,
            bind_group,
        }
    }

    /// Update ray instances
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[RayInstance]) {
        self.instances.update(queue, instances);
    }

    /// Clear all rays.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Renders the controller rays.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instances.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.slice());
        render_pass.draw(0..2, 0..self.instances.count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_instance_maps_unit_segment_onto_ray() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        let instance = RayInstance::new(&ray, 2.0, [1.0, 0.0, 0.0, 1.0]);
        let transform = Mat4::from_cols_array_2d(&instance.transform);

        let start = (transform * Vec4::new(0.0, 0.0, 0.0, 1.0)).truncate();
        let end = (transform * Vec4::new(0.0, 0.0, 1.0, 1.0)).truncate();
        assert!((start - ray.origin()).length() < 1e-5);
        assert!((end - ray.point_at(2.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_colors_by_controller_and_state() {
        assert_eq!(ray_color(0, ControllerState::Idle), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(ray_color(0, ControllerState::Hovering), [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(ray_color(1, ControllerState::Grabbed), [0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_ray_color_saturates_green_on_grab() {
        // Half green while hovering, full green once grabbed.
        assert_eq!(ray_color(0, ControllerState::Hovering)[1], 0.5);
        assert_eq!(ray_color(0, ControllerState::Grabbed)[1], 1.0);
    }
}
