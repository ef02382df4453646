#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Cave Generator
//!
//! Procedural voxel caves: layered coherent noise fills a density grid,
//! corridors and wandering worm tunnels are carved into it, and the solid
//! region is turned into a face-culled triangle mesh ready for a `wgpu`
//! vertex buffer. Floor cells can be sampled as marker positions for
//! decorative features such as crystals.
//!
//! ## Key Modules
//!
//! * `core` - Configuration and error types
//! * `cave_state` - The generator, the voxel pipeline and the mesher
//!
//! ## Usage
//!
//! ```
//! use cave_generator::{CaveConfig, CaveGenerator};
//!
//! let config = CaveConfig { width: 16, height: 16, depth: 16, rng_seed: Some(1), ..CaveConfig::default() };
//! let mut generator = CaveGenerator::from_config(config).unwrap();
//! generator.generate().unwrap();
//! generator.generate_features();
//! assert_eq!(generator.vertex_count() as usize, generator.mesh().vertices().len());
//! ```
//!
//! Uploading and drawing need a `wgpu::Device` and a render pass owned by the
//! caller; see [`CaveGenerator::upload`] and [`CaveGenerator::render`].

use std::path::PathBuf;

use log::{info, warn};

pub mod cave_state;
pub mod core;

pub use crate::cave_state::{
    buffer_state::MeshBuffer,
    rendering::{
        meshing::{Face, Mesh},
        Vertex,
    },
    voxels::{
        block::block_side::BlockSide,
        carving::CarveOperation,
        cave_builder::{CaveBuilder, CaveVolume},
        density::{noise_field::NoiseField, DensityGrid},
        features::place_markers,
        solidity::{SolidityClassifier, SolidityPolarity},
    },
    CaveGenerator,
};
pub use crate::core::{CaveConfig, GeneratorError, Result};

/// Generates a cave from the configuration file named on the command line
/// (or the default configuration), uploads it to a headless GPU device when
/// one is available, and prints the marker positions as JSON.
pub fn run() -> Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };

    let mut generator = CaveGenerator::from_config(config)?;
    generator.generate()?;
    generator.generate_features();

    match request_device() {
        Some(device) => {
            generator.upload(&device);
            info!("Cave mesh uploaded ({} vertices)", generator.vertex_count());
        }
        None => warn!("No GPU adapter available, skipping mesh upload"),
    }

    let markers: Vec<[f32; 3]> = generator
        .marker_positions()
        .iter()
        .map(|&p| p.into())
        .collect();
    println!("{}", serde_json::to_string_pretty(&markers)?);
    Ok(())
}

/// Requests a headless device, or `None` when no adapter is available.
pub(crate) fn request_device() -> Option<wgpu::Device> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .map_err(|err| warn!("Error requesting adapter: {:?}", err))
    .ok()?;

    let (device, _queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        label: Some("Cave Device"),
        memory_hints: wgpu::MemoryHints::MemoryUsage,
        trace: wgpu::Trace::Off,
    }))
    .map_err(|err| warn!("Error requesting device: {:?}", err))
    .ok()?;

    Some(device)
}
