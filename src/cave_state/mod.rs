//! # Cave State Module
//!
//! The generator facade tying the voxel pipeline to its outputs.
//!
//! ## Key Components
//!
//! * `CaveGenerator` - Owns the carved volume, its mesh, the GPU buffer and the marker list
//! * `buffer_state` - Scoped GPU vertex buffer for the mesh
//! * `rendering` - Vertex format and the face-culling mesher
//! * `voxels` - Density grid, noise, carving, solidity and feature placement
//!
//! ## Lifecycle
//!
//! 1. Construction validates the configuration and fixes the random seeds
//! 2. `generate` builds the carved volume from scratch and meshes it
//! 3. `upload` copies the mesh into a GPU vertex buffer
//! 4. `generate_features` samples marker positions on cave floors
//! 5. `render` records a draw of the uploaded mesh, every frame
//!
//! Everything runs synchronously on the calling thread. Generation is a
//! one-off loading cost; only `render` belongs in the frame loop, and it
//! never mutates the generator.

use cgmath::Point3;
use log::{info, warn};
use noise::{NoiseFn, Perlin};
use wgpu::{Device, RenderPass};

use crate::core::{CaveConfig, Result};

use buffer_state::MeshBuffer;
use rendering::meshing::Mesh;
use voxels::{
    cave_builder::{CaveBuilder, CaveVolume},
    features::place_markers,
};

pub mod buffer_state;
pub mod rendering;
pub mod voxels;

/// Procedural cave generator.
///
/// The noise function is a type parameter so generation can run on any
/// `NoiseFn`; the random source is seeded from `rng_seed` when given.
pub struct CaveGenerator<N = Perlin> {
    /// Validated configuration
    config: CaveConfig,
    /// Coherent noise for the density fill and worm steering
    noise: N,
    /// Seed for the random worms, fixed for the generator's lifetime
    worm_seed: u64,
    /// Random source for marker sampling
    rng: fastrand::Rng,
    /// Carved grid from the latest `generate`
    volume: Option<CaveVolume>,
    /// Mesh from the latest `generate`
    mesh: Mesh,
    /// GPU copy of `mesh`, if uploaded
    mesh_buffer: Option<MeshBuffer>,
    /// Markers from the latest `generate_features`
    marker_positions: Vec<Point3<f32>>,
}

impl CaveGenerator<Perlin> {
    /// Creates a generator with the given dimensions and threshold and the
    /// default configuration for everything else.
    ///
    /// # Errors
    /// Fails if any dimension is zero or negative.
    pub fn new(depth: i32, width: i32, height: i32, threshold: f32) -> Result<Self> {
        Self::from_config(CaveConfig::with_dimensions(depth, width, height, threshold)?)
    }

    /// Creates a Perlin-backed generator from a configuration.
    pub fn from_config(config: CaveConfig) -> Result<Self> {
        let noise = Perlin::new(config.noise_seed);
        Self::with_noise(config, noise)
    }
}

impl<N: NoiseFn<f64, 3> + Clone> CaveGenerator<N> {
    /// Creates a generator around an arbitrary noise function.
    ///
    /// Nothing is built until [`CaveGenerator::generate`] runs.
    pub fn with_noise(config: CaveConfig, noise: N) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.rng_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let worm_seed = rng.u64(..);

        Ok(CaveGenerator {
            config,
            noise,
            worm_seed,
            rng,
            volume: None,
            mesh: Mesh::new(),
            mesh_buffer: None,
            marker_positions: Vec::new(),
        })
    }

    /// Fills the density grid, runs every carve in order and meshes the
    /// result.
    ///
    /// The previous mesh and any uploaded buffer are discarded; call
    /// [`CaveGenerator::upload`] again before rendering.
    pub fn generate(&mut self) -> Result<()> {
        let volume = CaveBuilder::with_noise(self.config.clone(), self.noise.clone())
            .random_worms(self.worm_seed, &self.config.random_worms)
            .build()?;
        self.mesh = Mesh::from_volume(&volume);
        self.volume = Some(volume);
        self.mesh_buffer = None;
        info!(
            "Generated cave mesh with {} vertices",
            self.mesh.vertex_count()
        );
        Ok(())
    }

    /// Uploads the current mesh, replacing any earlier buffer.
    pub fn upload(&mut self, device: &Device) {
        // The old buffer is released before the new one is allocated
        self.mesh_buffer = None;
        let mesh_buffer = MeshBuffer::upload(device, &self.mesh);
        info!(
            "Cave mesh uploaded: {} vertices, {} bytes",
            mesh_buffer.vertex_count(),
            mesh_buffer.size()
        );
        self.mesh_buffer = Some(mesh_buffer);
    }

    /// Samples a fresh set of marker positions on cave floors.
    ///
    /// Each call draws new random numbers, so repeated calls give different
    /// sets unless the generator was seeded and rebuilt. Places nothing
    /// before the first `generate`.
    pub fn generate_features(&mut self) {
        let Some(volume) = &self.volume else {
            warn!("generate_features called before generate, no markers placed");
            self.marker_positions.clear();
            return;
        };
        self.marker_positions =
            place_markers(volume, self.config.features.probability, &mut self.rng);
        info!("Placed {} markers", self.marker_positions.len());
    }

    /// Markers from the latest [`CaveGenerator::generate_features`].
    pub fn marker_positions(&self) -> &[Point3<f32>] {
        &self.marker_positions
    }

    /// Records a draw of the uploaded mesh into `render_pass`.
    ///
    /// Draws nothing until both `generate` and `upload` have run.
    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        if let Some(mesh_buffer) = &self.mesh_buffer {
            mesh_buffer.draw(render_pass);
        }
    }

    /// The carved volume, once `generate` has run.
    pub fn volume(&self) -> Option<&CaveVolume> {
        self.volume.as_ref()
    }

    /// The mesh from the latest `generate`.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Vertices in the latest mesh.
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }

    /// Whether a GPU buffer for the current mesh exists.
    pub fn is_uploaded(&self) -> bool {
        self.mesh_buffer.is_some()
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &CaveConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeneratorError;

    fn seeded(size: u32, seed: u64) -> CaveConfig {
        CaveConfig {
            width: size,
            height: size,
            depth: size,
            rng_seed: Some(seed),
            ..CaveConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(
            CaveGenerator::new(0, 4, 4, 0.0),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        assert!(CaveGenerator::new(4, -1, 4, 0.0).is_err());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut generator = CaveGenerator::from_config(seeded(20, 3)).unwrap();
        generator.generate().unwrap();
        let first = generator.mesh().clone();
        generator.generate().unwrap();
        assert_eq!(generator.mesh(), &first);
        assert_eq!(generator.vertex_count(), first.vertex_count());
    }

    #[test]
    fn test_mesh_is_empty_before_generate() {
        let generator = CaveGenerator::new(8, 8, 8, 0.0).unwrap();
        assert_eq!(generator.vertex_count(), 0);
        assert!(!generator.is_uploaded());
        assert!(generator.volume().is_none());
        assert!(generator.marker_positions().is_empty());
    }

    #[test]
    fn test_features_before_generate_place_nothing() {
        let mut config = seeded(8, 2);
        config.features.probability = 1.0;
        let mut generator = CaveGenerator::from_config(config).unwrap();
        generator.generate_features();
        assert!(generator.marker_positions().is_empty());
    }

    #[test]
    fn test_generate_drops_stale_upload() {
        let Some(device) = crate::request_device() else {
            return;
        };
        let mut generator = CaveGenerator::from_config(seeded(12, 4)).unwrap();
        generator.upload(&device);
        assert!(generator.is_uploaded());

        generator.generate().unwrap();
        assert!(!generator.is_uploaded());

        generator.upload(&device);
        generator.upload(&device);
        assert!(generator.is_uploaded());
        assert_eq!(
            generator.mesh_buffer.as_ref().map(MeshBuffer::vertex_count),
            Some(generator.vertex_count())
        );
    }

    #[test]
    fn test_same_seed_same_cave() {
        let mut a = CaveGenerator::from_config(seeded(16, 11)).unwrap();
        let mut b = CaveGenerator::from_config(seeded(16, 11)).unwrap();
        a.generate().unwrap();
        b.generate().unwrap();
        assert_eq!(a.volume(), b.volume());
        a.generate_features();
        b.generate_features();
        assert_eq!(a.marker_positions(), b.marker_positions());
    }

    #[test]
    fn test_generate_features_resamples() {
        let mut config = seeded(24, 5);
        config.features.probability = 0.5;
        let mut generator = CaveGenerator::from_config(config).unwrap();
        generator.generate().unwrap();
        let volume = generator.volume().unwrap().clone();

        generator.generate_features();
        let first = generator.marker_positions().to_vec();
        generator.generate_features();
        let second = generator.marker_positions().to_vec();

        if !first.is_empty() {
            assert_ne!(first, second);
        }
        for marker in first.iter().chain(second.iter()) {
            let (x, y, z) = (marker.x as i32, marker.y as i32, marker.z as i32);
            assert!(volume.is_solid(x, y - 1, z));
            assert!(!volume.is_solid(x, y, z));
        }
    }
}
