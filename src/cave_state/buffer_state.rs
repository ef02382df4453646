//! # Buffer State Module
//!
//! Owns the GPU vertex buffer holding the cave mesh.
//!
//! A [`MeshBuffer`] is created from a [`Mesh`] in one upload and released
//! exactly once when it is dropped. Replacing the mesh means dropping the old
//! `MeshBuffer` and uploading a new one; there is no partial update.

use log::debug;
use wgpu::{util::DeviceExt, Buffer, Device, RenderPass};

use super::rendering::{meshing::Mesh, Vertex};

/// Label attached to the cave vertex buffer.
pub const CAVE_VERTEX_BUFFER: &str = "Cave Vertex Buffer";

/// A scoped GPU vertex buffer plus the vertex count needed to draw it.
#[derive(Debug)]
pub struct MeshBuffer {
    /// Vertex data on the GPU; `None` for an empty mesh
    buffer: Option<Buffer>,
    /// Number of vertices to draw
    vertex_count: u32,
}

impl MeshBuffer {
    /// Uploads `mesh` into a new vertex buffer.
    ///
    /// An empty mesh allocates nothing and draws nothing.
    pub fn upload(device: &Device, mesh: &Mesh) -> Self {
        let buffer = (!mesh.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(CAVE_VERTEX_BUFFER),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        debug!(
            "Uploaded {} vertices ({} bytes) to {}",
            mesh.vertex_count(),
            mesh.as_bytes().len(),
            CAVE_VERTEX_BUFFER
        );

        MeshBuffer {
            buffer,
            vertex_count: mesh.vertex_count(),
        }
    }

    /// Number of vertices the buffer holds.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Size of the buffer in bytes.
    pub fn size(&self) -> u64 {
        self.vertex_count as u64 * std::mem::size_of::<Vertex>() as u64
    }

    /// Binds the buffer to slot 0 and draws it as a triangle list.
    ///
    /// The caller owns the pipeline, bind groups and uniforms.
    pub fn draw(&self, render_pass: &mut RenderPass<'_>) {
        if let Some(buffer) = &self.buffer {
            render_pass.set_vertex_buffer(0, buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }
    }

    /// Destroys the GPU buffer. Later calls do nothing.
    fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.destroy();
            debug!("Released {} ({} vertices)", CAVE_VERTEX_BUFFER, self.vertex_count);
        }
    }
}

impl Drop for MeshBuffer {
    fn drop(&mut self) {
        self.release();
    }
}
