use wgpu::util::DeviceExt;
use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::gpu::quad::{QuadInstance, UNIT_QUAD};

/// Vertex and instance buffers for drawing cells
pub struct QuadBuffers {
    /// Unit quad corners, uploaded once
    pub vertex_buffer: Buffer,
    /// One rectangle per live cell, rewritten every frame
    pub instance_buffer: Buffer,
    /// Most instances the buffer can hold
    capacity: usize,
}

impl QuadBuffers {
    /// Create buffers able to hold an instance for every one of `cell_count` cells
    pub fn new(device: &Device, cell_count: usize) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad-vertex-buffer"),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: BufferUsages::VERTEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad-instance-buffer"),
            size: (cell_count.max(1) * std::mem::size_of::<QuadInstance>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vertex_buffer,
            instance_buffer,
            capacity: cell_count,
        }
    }

    /// Upload this frame's instances, returning how many will be drawn
    pub fn upload(&self, queue: &Queue, instances: &[QuadInstance]) -> u32 {
        assert!(
            instances.len() <= self.capacity,
            "Instance count {} exceeds capacity {}",
            instances.len(),
            self.capacity
        );

        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        instances.len() as u32
    }

    /// Vertex layouts matching `shaders/quad.wgsl`
    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        const CORNER_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
            wgpu::vertex_attr_array![0 => Float32x2];
        const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2];

        [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CORNER_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<QuadInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRIBUTES,
            },
        ]
    }
}
