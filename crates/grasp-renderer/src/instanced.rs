//! Instance buffer management utilities
//!
//! This module provides utilities for managing instance buffers used
//! in instanced rendering (boxes, rays, markers).

use bytemuck::Pod;
use std::marker::PhantomData;

/// Manages an instance buffer with automatic capacity tracking.
///
/// This struct handles the common pattern of:
/// - Pre-allocating a buffer with maximum capacity
/// - Tracking current instance count
/// - Warning when instances exceed capacity
///
/// # Type Parameters
///
/// * `T` - The instance data type. Must implement `Pod` for zero-copy GPU upload.
pub struct InstanceBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    count: u32,
    max_instances: u32,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    /// Create a new instance buffer with the given capacity.
    ///
    /// # Arguments
    ///
    /// * `device` - The wgpu device.
    /// * `label` - Buffer label for debugging.
    /// * `max_instances` - Maximum number of instances this buffer can hold.
    pub fn new(device: &wgpu::Device, label: &str, max_instances: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Instance Buffer", label)),
            size: (max_instances as usize * std::mem::size_of::<T>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            count: 0,
            max_instances,
            _marker: PhantomData,
        }
    }

    /// Update the instance buffer with new data.
    ///
    /// If `instances` exceeds the maximum capacity, a warning is logged
    /// and the data is truncated.
    pub fn update(&mut self, queue: &wgpu::Queue, instances: &[T]) {
        let count = instances.len();

        if count > self.max_instances as usize {
            tracing::warn!(
                "Instance count {} exceeds maximum {}, truncating",
                count,
                self.max_instances
            );
        }

        let count = count.min(self.max_instances as usize);
        self.count = count as u32;

        if count > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances[..count]));
        }
    }

    /// Clear all instances.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Get the current instance count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the maximum capacity.
    pub fn max_instances(&self) -> u32 {
        self.max_instances
    }

    /// Get a buffer slice for use in render passes.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}
