//! Camera uniform management
//!
//! Owns the orbit camera, its uniform buffer, and the bind group layout
//! shared by every sub-renderer.

use wgpu::util::DeviceExt;

use crate::camera::Camera;

/// Camera plus GPU-side uniform state.
pub struct CameraController {
    camera: Camera,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraController {
    pub fn new(device: &wgpu::Device, aspect: f32) -> Self {
        let camera = Camera::new(aspect);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&camera.uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        Self {
            camera,
            buffer,
            bind_group_layout,
        }
    }

    /// Upload the current camera state to the GPU.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.camera.uniform()));
    }

    /// Update the aspect ratio after a resize.
    pub fn update_aspect(&mut self, width: u32, height: u32) {
        self.camera
            .update_aspect(width.max(1) as f32 / height.max(1) as f32);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}
