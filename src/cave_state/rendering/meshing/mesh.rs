//! Mesh data structures and operations for cave rendering.
//!
//! This module walks a carved [`CaveVolume`] and emits one quad for every face
//! of a solid cell whose neighbour is open or outside the grid. There is no
//! merging of coplanar faces; each visible cell face is its own quad.

use log::info;
use web_time::Instant;

use crate::cave_state::{
    rendering::Vertex,
    voxels::{block::block_side::BlockSide, cave_builder::CaveVolume},
};

use super::face::Face;

/// Number of vertices emitted per visible face (two triangles).
pub const VERTICES_PER_FACE: usize = 6;

/// Triangle-list geometry for a whole cave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertices in emission order, six per face
    vertices: Vec<Vertex>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
        }
    }

    /// Generates the boundary mesh of the solid region of `volume`.
    ///
    /// Cells are visited z outer, y middle, x inner, and faces of a cell in
    /// [`BlockSide::all`] order. That order fixes the vertex sequence; the
    /// set of faces depends only on the volume.
    pub fn from_volume(volume: &CaveVolume) -> Self {
        let start = Instant::now();
        let [width, height, depth] = volume.dimensions();
        let mut mesh = Mesh::new();

        for z in 0..depth as i32 {
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    if !volume.is_solid(x, y, z) {
                        continue;
                    }
                    for side in BlockSide::all() {
                        if !volume.has_neighbour(x, y, z, side) {
                            mesh.add_face(&Face::new(x, y, z, side));
                        }
                    }
                }
            }
        }

        info!(
            "Meshed {} faces ({} vertices) in {:?}",
            mesh.face_count(),
            mesh.vertex_count(),
            start.elapsed()
        );
        mesh
    }

    /// Appends the six vertices of `face`.
    pub fn add_face(&mut self, face: &Face) {
        self.vertices.extend_from_slice(&face.vertices());
    }

    /// All vertices in emission order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex count, in the form a draw call takes it.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as raw bytes for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
