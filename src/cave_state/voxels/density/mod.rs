//! # Density Module
//!
//! This module provides the `DensityGrid`, a dense 3D array holding one scalar
//! per cell, and the layered noise that fills it.
//!
//! ## Memory Layout
//!
//! Values are stored in a single `Vec<f32>` with x varying fastest, then y,
//! then z. Filling with [`DensityGrid::from_fn`] visits cells in exactly that
//! order (z outer, y middle, x inner), so the fill is a straight push.
//!
//! ## Bounds
//!
//! Every accessor takes signed coordinates and answers `None` (or ignores the
//! write) when a coordinate is outside the grid. Neighbour checks and carving
//! rely on this instead of pre-validating their inputs.

use std::ops::Range;

use crate::core::{GeneratorError, Result};

pub mod noise_field;

/// A dense `width * height * depth` grid of density values.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    /// Extent along x
    width: usize,
    /// Extent along y
    height: usize,
    /// Extent along z
    depth: usize,
    /// Cell values, x fastest then y then z
    values: Vec<f32>,
}

impl DensityGrid {
    /// Creates a grid with every cell set to `fill`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidDimensions`] if any dimension is zero
    /// or the grid cannot be indexed with `i32` coordinates.
    pub fn new(width: u32, height: u32, depth: u32, fill: f32) -> Result<Self> {
        Self::from_fn(width, height, depth, |_, _, _| fill)
    }

    /// Creates a grid by evaluating `density` once per cell in z, y, x order.
    pub fn from_fn(
        width: u32,
        height: u32,
        depth: u32,
        mut density: impl FnMut(i32, i32, i32) -> f32,
    ) -> Result<Self> {
        let len = Self::checked_len(width, height, depth)?;
        let mut values = Vec::with_capacity(len);
        for z in 0..depth as i32 {
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    values.push(density(x, y, z));
                }
            }
        }

        Ok(DensityGrid {
            width: width as usize,
            height: height as usize,
            depth: depth as usize,
            values,
        })
    }

    fn checked_len(width: u32, height: u32, depth: u32) -> Result<usize> {
        let invalid = || GeneratorError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
            depth: depth as i64,
        };
        let limit = i32::MAX as u32;
        if [width, height, depth].iter().any(|&d| d == 0 || d > limit) {
            return Err(invalid());
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|plane| plane.checked_mul(depth as usize))
            .ok_or_else(invalid)
    }

    /// Extent along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Extent along z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Extents as `[width, height, depth]`.
    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values in storage order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Whether `(x, y, z)` names a cell of this grid.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some()
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(x + self.width * (y + self.height * z))
    }

    /// Density at `(x, y, z)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<f32> {
        self.index(x, y, z).map(|i| self.values[i])
    }

    /// Overwrites the density at `(x, y, z)`. Writes outside the grid are
    /// dropped; the return value tells whether the cell existed.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: f32) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Clips the half-open interval `[start, end)` to the valid indices of
    /// `axis` (0 = x, 1 = y, 2 = z). The result may be empty.
    pub fn clamp_range(&self, axis: usize, start: i64, end: i64) -> Range<i32> {
        let extent = self.dimensions()[axis] as i64;
        let lo = start.clamp(0, extent);
        let hi = end.clamp(lo, extent);
        lo as i32..hi as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimension() {
        assert!(matches!(
            DensityGrid::new(4, 0, 4, 0.0),
            Err(GeneratorError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn test_from_fn_layout() {
        let grid = DensityGrid::from_fn(3, 4, 5, |x, y, z| (x + 10 * y + 100 * z) as f32).unwrap();
        assert_eq!(grid.len(), 60);
        assert_eq!(grid.get(2, 3, 4), Some(432.0));
        assert_eq!(grid.get(1, 0, 0), Some(1.0));
        assert_eq!(grid.values()[3], 10.0);
        assert_eq!(grid.values()[12], 100.0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = DensityGrid::new(2, 2, 2, 0.5).unwrap();
        assert_eq!(grid.get(-1, 0, 0), None);
        assert_eq!(grid.get(0, 2, 0), None);
        assert_eq!(grid.get(1, 1, 1), Some(0.5));
        assert!(!grid.set(0, 0, 2, 1.0));
        assert!(grid.set(0, 0, 1, 1.0));
        assert_eq!(grid.get(0, 0, 1), Some(1.0));
        assert!(!grid.contains(i32::MIN, 0, 0));
    }

    #[test]
    fn test_clamp_range() {
        let grid = DensityGrid::new(10, 5, 3, 0.0).unwrap();
        assert_eq!(grid.clamp_range(0, -4, 3), 0..3);
        assert_eq!(grid.clamp_range(1, 2, 50), 2..5);
        assert_eq!(grid.clamp_range(2, 7, 9), 3..3);
        assert!(grid.clamp_range(0, 6, 2).is_empty());
    }
}
