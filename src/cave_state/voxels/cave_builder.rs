//! # Cave Builder Module
//!
//! Builds a carved [`CaveVolume`] in two explicit phases: fill the density
//! grid from the noise field, then apply an ordered list of carve operations.
//! The carve list is plain data on the builder, so the order in which carves
//! run is part of the API rather than a side effect of construction.
//!
//! ```
//! use cave_generator::{CaveBuilder, CaveConfig, CarveOperation};
//!
//! let config = CaveConfig { width: 16, height: 16, depth: 16, ..CaveConfig::default() };
//! let volume = CaveBuilder::new(config)
//!     .carve(CarveOperation::Corridor { start: [0, 0, 0], size: [4, 4, 4] })
//!     .build()
//!     .unwrap();
//! assert!(!volume.is_solid(0, 0, 0));
//! ```

use log::{debug, info};
use noise::{NoiseFn, Perlin};
use web_time::Instant;

use crate::core::{config::RandomWormParams, CaveConfig, Result};

use super::{
    block::block_side::BlockSide,
    carving::CarveOperation,
    density::{noise_field::NoiseField, DensityGrid},
    solidity::SolidityClassifier,
};

/// A finished cave: the carved density grid and the classifier that reads it.
///
/// Read-only once built. All solidity queries for meshing and placement go
/// through this type.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveVolume {
    /// Final, carved densities
    grid: DensityGrid,
    /// Threshold and polarity for `grid`
    classifier: SolidityClassifier,
}

impl CaveVolume {
    /// Wraps an existing grid.
    pub fn from_grid(grid: DensityGrid, classifier: SolidityClassifier) -> Self {
        CaveVolume { grid, classifier }
    }

    /// The carved density grid.
    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    /// The classifier applied to the grid.
    pub fn classifier(&self) -> &SolidityClassifier {
        &self.classifier
    }

    /// Extents as `[width, height, depth]`.
    pub fn dimensions(&self) -> [usize; 3] {
        self.grid.dimensions()
    }

    /// Whether the cell at `(x, y, z)` is solid; false outside the grid.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.classifier.is_solid(&self.grid, x, y, z)
    }

    /// Whether the neighbour across `side` exists and is solid.
    pub fn has_neighbour(&self, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
        self.classifier.has_neighbour(&self.grid, x, y, z, side)
    }

    /// Number of solid cells.
    pub fn solid_count(&self) -> usize {
        self.grid
            .values()
            .iter()
            .filter(|&&density| self.classifier.classify(density))
            .count()
    }
}

/// Builder for a [`CaveVolume`].
///
/// Starts with the carves listed in the configuration; [`CaveBuilder::carve`]
/// appends more. Carves run in list order.
pub struct CaveBuilder<N = Perlin> {
    /// Dimensions, noise and classifier settings
    config: CaveConfig,
    /// Coherent noise shared by the density fill and worm steering
    noise: N,
    /// Ordered carve list
    carves: Vec<CarveOperation>,
}

impl CaveBuilder<Perlin> {
    /// Creates a builder backed by Perlin noise seeded from the configuration.
    pub fn new(config: CaveConfig) -> Self {
        let noise = Perlin::new(config.noise_seed);
        Self::with_noise(config, noise)
    }
}

impl<N: NoiseFn<f64, 3>> CaveBuilder<N> {
    /// Creates a builder around an arbitrary noise function.
    pub fn with_noise(config: CaveConfig, noise: N) -> Self {
        let carves = config.carves.clone();
        CaveBuilder {
            config,
            noise,
            carves,
        }
    }

    /// Replaces the noise function, keeping configuration and carve list.
    pub fn noise<M: NoiseFn<f64, 3>>(self, noise: M) -> CaveBuilder<M> {
        CaveBuilder {
            config: self.config,
            noise,
            carves: self.carves,
        }
    }

    /// Appends a carve to run after all carves added so far.
    pub fn carve(mut self, operation: CarveOperation) -> Self {
        self.carves.push(operation);
        self
    }

    /// Appends `params.count` random worms drawn from a generator seeded with
    /// `seed`. The same seed always yields the same worms.
    pub fn random_worms(mut self, seed: u64, params: &RandomWormParams) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let dimensions = [
            self.config.width as usize,
            self.config.height as usize,
            self.config.depth as usize,
        ];
        for _ in 0..params.count {
            self.carves
                .push(CarveOperation::random_worm(&mut rng, dimensions, params));
        }
        self
    }

    /// The carve list in application order.
    pub fn carves(&self) -> &[CarveOperation] {
        &self.carves
    }

    /// Fills the grid from noise and applies every carve in order.
    pub fn build(self) -> Result<CaveVolume> {
        self.config.validate()?;
        let start = Instant::now();

        let field = NoiseField::with_noise(
            self.noise,
            self.config.noise.clone(),
            self.config.biome.clone(),
        );
        let mut grid = field.fill(self.config.width, self.config.height, self.config.depth)?;
        debug!("Filled {} density cells in {:?}", grid.len(), start.elapsed());

        let open_density = self.config.polarity.open_density();
        let mut carved = 0;
        for operation in &self.carves {
            carved += operation.apply(&mut grid, field.noise(), open_density);
        }

        let volume = CaveVolume::from_grid(
            grid,
            SolidityClassifier::new(self.config.threshold, self.config.polarity),
        );
        info!(
            "Built {}x{}x{} cave: {} carves touching {} cells, {} solid cells, took {:?}",
            self.config.width,
            self.config.height,
            self.config.depth,
            self.carves.len(),
            carved,
            volume.solid_count(),
            start.elapsed()
        );
        Ok(volume)
    }
}
