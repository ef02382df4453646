//! # Rendering Module
//!
//! CPU-side geometry for the cave: the vertex format shared with the GPU and
//! the face-culling mesher. Uploading and drawing live in `buffer_state`.

pub mod meshing;
pub mod vertex;

pub use vertex::Vertex;
