//! # Voxels Module
//!
//! Everything that lives on the voxel grid before any geometry exists.
//!
//! ## Data Flow
//!
//! 1. `density::noise_field` evaluates layered noise for every cell
//! 2. `carving` forces corridors and worm tunnels open, in list order
//! 3. `cave_builder` wraps the carved grid and its classifier as a `CaveVolume`
//! 4. `features` scans the volume for floor cells to place markers on
//!
//! The mesher in `rendering::meshing` reads the same `CaveVolume`.

pub mod block;
pub mod carving;
pub mod cave_builder;
pub mod density;
pub mod features;
pub mod solidity;
