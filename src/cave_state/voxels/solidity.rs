//! # Solidity Module
//!
//! The one place that turns a stored density into solid or open. Meshing and
//! feature placement both go through [`SolidityClassifier`] against the carved
//! grid; nothing re-derives solidity from the noise, since carving only exists
//! in the stored values.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::{block::block_side::BlockSide, density::DensityGrid};

/// Magnitude of the density written into carved cells.
///
/// Far outside the range layered noise can produce, so a carved cell stays
/// open for any finite threshold that noise could straddle.
pub const OPEN_DENSITY: f32 = 1.0e6;

/// Which side of the threshold counts as solid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolidityPolarity {
    /// Solid when `density < threshold`
    #[default]
    BelowThreshold,
    /// Solid when `density > threshold`
    AboveThreshold,
}

impl SolidityPolarity {
    /// Density a carve writes so the cell classifies as open.
    pub fn open_density(self) -> f32 {
        match self {
            SolidityPolarity::BelowThreshold => OPEN_DENSITY,
            SolidityPolarity::AboveThreshold => -OPEN_DENSITY,
        }
    }

    fn is_solid(self, density: f32, threshold: f32) -> bool {
        match self {
            SolidityPolarity::BelowThreshold => density < threshold,
            SolidityPolarity::AboveThreshold => density > threshold,
        }
    }
}

/// Threshold plus comparison direction, applied to a [`DensityGrid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidityClassifier {
    /// Density value separating the two classes
    pub threshold: f32,
    /// Comparison direction
    pub polarity: SolidityPolarity,
}

impl SolidityClassifier {
    /// Creates a classifier.
    pub fn new(threshold: f32, polarity: SolidityPolarity) -> Self {
        SolidityClassifier {
            threshold,
            polarity,
        }
    }

    /// Whether a raw density value is solid.
    pub fn classify(&self, density: f32) -> bool {
        self.polarity.is_solid(density, self.threshold)
    }

    /// Whether the cell at `(x, y, z)` is solid. Cells outside the grid are
    /// never solid.
    pub fn is_solid(&self, grid: &DensityGrid, x: i32, y: i32, z: i32) -> bool {
        grid.get(x, y, z)
            .map(|density| self.classify(density))
            .unwrap_or(false)
    }

    /// Whether the cell across `side` from `(x, y, z)` exists and is solid.
    pub fn has_neighbour(
        &self,
        grid: &DensityGrid,
        x: i32,
        y: i32,
        z: i32,
        side: BlockSide,
    ) -> bool {
        let neighbour = side.neighbour_of(Point3::new(x, y, z));
        self.is_solid(grid, neighbour.x, neighbour.y, neighbour.z)
    }

    /// For each side in [`BlockSide::all`] order, whether that neighbour is
    /// solid.
    pub fn adjacent_solids(&self, grid: &DensityGrid, x: i32, y: i32, z: i32) -> [bool; 6] {
        BlockSide::all().map(|side| self.has_neighbour(grid, x, y, z, side))
    }
}
