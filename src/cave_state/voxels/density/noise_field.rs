//! # Noise Field Module
//!
//! Layered coherent noise evaluated per grid cell. Octaves are summed with the
//! frequency growing by `lacunarity` and the amplitude shrinking by
//! `persistence` each layer. Cells below the biome transition switch to a
//! second scale/persistence pair, which gives a hard stratified change in the
//! cave's character at that height.

use noise::{NoiseFn, Perlin};

use crate::core::{
    config::{BiomeParams, NoiseParams},
    CaveConfig, Result,
};

use super::DensityGrid;

/// Density function over integer cell coordinates.
///
/// The coherent noise source is injected, so tests and callers may swap
/// `Perlin` for any `NoiseFn<f64, 3>`.
#[derive(Clone, Debug)]
pub struct NoiseField<N = Perlin> {
    /// Coherent noise sampled by every octave
    noise: N,
    /// Layering used at and above the transition
    params: NoiseParams,
    /// Overrides used below the transition
    biome: BiomeParams,
}

impl NoiseField<Perlin> {
    /// Creates a Perlin-backed field using the noise settings of `config`.
    pub fn from_config(config: &CaveConfig) -> Self {
        Self::with_noise(
            Perlin::new(config.noise_seed),
            config.noise.clone(),
            config.biome.clone(),
        )
    }
}

impl<N: NoiseFn<f64, 3>> NoiseField<N> {
    /// Creates a field around an arbitrary noise function.
    pub fn with_noise(noise: N, params: NoiseParams, biome: BiomeParams) -> Self {
        NoiseField {
            noise,
            params,
            biome,
        }
    }

    /// The underlying coherent noise function.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Density of the cell at `(x, y, z)`.
    ///
    /// Pure in its arguments: repeated calls return bit-identical values.
    /// Callers pass in-range coordinates; nothing here checks bounds.
    pub fn density(&self, x: i32, y: i32, z: i32) -> f32 {
        let (scale, persistence) = if (y as i64) < self.biome.transition_y as i64 {
            (self.biome.scale, self.biome.persistence)
        } else {
            (self.params.scale, self.params.persistence)
        };

        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.params.octaves {
            let position = [
                x as f64 * scale[0] * frequency,
                y as f64 * scale[1] * frequency,
                z as f64 * scale[2] * frequency,
            ];
            sum += amplitude * self.noise.get(position);
            amplitude *= persistence;
            frequency *= self.params.lacunarity;
        }

        sum as f32
    }

    /// Evaluates the field over a whole `width * height * depth` grid.
    pub fn fill(&self, width: u32, height: u32, depth: u32) -> Result<DensityGrid> {
        DensityGrid::from_fn(width, height, depth, |x, y, z| self.density(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sum of the coordinates, so every octave's input is visible in the output.
    struct CoordinateSum;

    impl NoiseFn<f64, 3> for CoordinateSum {
        fn get(&self, point: [f64; 3]) -> f64 {
            point[0] + point[1] + point[2]
        }
    }

    fn single_octave() -> NoiseParams {
        NoiseParams {
            octaves: 1,
            ..NoiseParams::default()
        }
    }

    #[test]
    fn test_density_is_deterministic() {
        let field = NoiseField::from_config(&CaveConfig::default());
        for (x, y, z) in [(3, 25, 7), (13, 4, 41), (63, 63, 63)] {
            let a = field.density(x, y, z);
            let b = field.density(x, y, z);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = CaveConfig {
            noise_seed: 7,
            ..CaveConfig::default()
        };
        let a = NoiseField::from_config(&config).fill(8, 30, 8).unwrap();
        let b = NoiseField::from_config(&config).fill(8, 30, 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_octaves_accumulate() {
        let params = NoiseParams {
            scale: [1.0, 1.0, 1.0],
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        };
        let biome = BiomeParams {
            transition_y: 0,
            ..BiomeParams::default()
        };
        let field = NoiseField::with_noise(CoordinateSum, params, biome);
        // 1*1 + 0.5*2 + 0.25*4 for a coordinate sum of 1
        assert_eq!(field.density(1, 0, 0), 3.0);
    }

    #[test]
    fn test_biome_switch_is_abrupt() {
        let biome = BiomeParams {
            transition_y: 20,
            scale: [0.1, 0.1, 0.05],
            persistence: 0.7,
        };
        let field = NoiseField::with_noise(CoordinateSum, single_octave(), biome);

        let below = field.density(10, 19, 0);
        let at = field.density(10, 20, 0);
        assert!((below - (10.0 * 0.1 + 19.0 * 0.1) as f32).abs() < 1e-6);
        assert!((at - (10.0 * 0.05 + 20.0 * 0.05) as f32).abs() < 1e-6);
    }

    #[test]
    fn test_fill_matches_density() {
        let field = NoiseField::from_config(&CaveConfig::default());
        let grid = field.fill(5, 24, 6).unwrap();
        for (x, y, z) in [(0, 0, 0), (4, 19, 5), (2, 20, 3), (4, 23, 5)] {
            assert_eq!(grid.get(x, y, z), Some(field.density(x, y, z)));
        }
    }
}
