//! Meshing for the carved cave.
//!
//! # Architecture
//! - [`Face`]: One unit quad on a solid cell, built from its side's corner frame
//! - [`Mesh`]: Every visible face of a volume, as a flat triangle list
//!
//! # Usage
//! ```
//! use cave_generator::{CaveBuilder, CaveConfig, Mesh};
//!
//! let config = CaveConfig { width: 8, height: 8, depth: 8, ..CaveConfig::default() };
//! let volume = CaveBuilder::new(config).build().unwrap();
//! let mesh = Mesh::from_volume(&volume);
//! assert_eq!(mesh.vertex_count() % 6, 0);
//! ```

mod face;
mod mesh;

pub use face::{Face, FACE_TEX_COORDS};
pub use mesh::*;
