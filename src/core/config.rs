//! # Configuration Module
//!
//! Serializable settings for a cave generator. Every field has a default, so a
//! JSON file only needs to name the values it overrides:
//!
//! ```json
//! { "width": 32, "height": 32, "depth": 32, "threshold": 0.1 }
//! ```
//!
//! The layered noise settings live in [`NoiseParams`]; the lower stratum that
//! switches to coarser features is described by [`BiomeParams`].

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cave_state::voxels::{carving::CarveOperation, solidity::SolidityPolarity};

use super::error::{GeneratorError, Result};

/// Layered coherent-noise parameters used above the biome transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Per-axis coordinate scale applied before sampling
    pub scale: [f64; 3],
    /// Number of noise layers accumulated per cell
    pub octaves: u32,
    /// Amplitude multiplier between consecutive octaves
    pub persistence: f64,
    /// Frequency multiplier between consecutive octaves
    pub lacunarity: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: [0.05, 0.05, 0.05],
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// The deep stratum: cells with `y < transition_y` sample noise with these
/// values instead of the ones in [`NoiseParams`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeParams {
    /// First y level that uses the regular noise parameters
    pub transition_y: u32,
    /// Per-axis scale below the transition
    pub scale: [f64; 3],
    /// Persistence below the transition
    pub persistence: f64,
}

impl Default for BiomeParams {
    fn default() -> Self {
        Self {
            transition_y: 20,
            scale: [0.1, 0.1, 0.05],
            persistence: 0.7,
        }
    }
}

/// Randomized worms appended after the explicit carve list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWormParams {
    /// How many worms to spawn per generation
    pub count: u32,
    /// Steps taken by each worm
    pub length: u32,
    /// Carve radius, also the basis of the step size
    pub thickness: f32,
}

impl Default for RandomWormParams {
    fn default() -> Self {
        Self {
            count: 2,
            length: 120,
            thickness: 2.5,
        }
    }
}

/// Marker placement settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    /// Chance that an open cell resting on a solid one becomes a marker
    pub probability: f32,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self { probability: 0.01 }
    }
}

/// Complete description of one cave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Extent along x
    pub width: u32,
    /// Extent along y
    pub height: u32,
    /// Extent along z
    pub depth: u32,
    /// Density value separating solid cells from open ones
    pub threshold: f32,
    /// Which side of the threshold counts as solid
    pub polarity: SolidityPolarity,
    /// Noise layers above the biome transition
    pub noise: NoiseParams,
    /// Noise overrides below the biome transition
    pub biome: BiomeParams,
    /// Explicit carve operations, applied in order
    pub carves: Vec<CarveOperation>,
    /// Seeded random worms, applied after `carves`
    pub random_worms: RandomWormParams,
    /// Marker placement
    pub features: FeatureParams,
    /// Seed of the coherent noise function
    pub noise_seed: u32,
    /// Seed of the random source; `None` draws one from the OS
    pub rng_seed: Option<u64>,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            depth: 64,
            threshold: 0.0,
            polarity: SolidityPolarity::default(),
            noise: NoiseParams::default(),
            biome: BiomeParams::default(),
            carves: vec![CarveOperation::Corridor {
                start: [20, 40, 20],
                size: [10, 8, 40],
            }],
            random_worms: RandomWormParams::default(),
            features: FeatureParams::default(),
            noise_seed: 0,
            rng_seed: None,
        }
    }
}

impl CaveConfig {
    /// Creates a configuration with the given dimensions and threshold and
    /// defaults everywhere else.
    ///
    /// Dimensions are taken as signed values so that negative requests are
    /// rejected instead of wrapping.
    pub fn with_dimensions(depth: i32, width: i32, height: i32, threshold: f32) -> Result<Self> {
        if depth <= 0 || width <= 0 || height <= 0 {
            return Err(GeneratorError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
                depth: depth as i64,
            });
        }

        let config = Self {
            width: width as u32,
            height: height as u32,
            depth: depth as u32,
            threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading cave configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks every precondition generation relies on.
    pub fn validate(&self) -> Result<()> {
        let invalid_dimensions = || GeneratorError::InvalidDimensions {
            width: self.width as i64,
            height: self.height as i64,
            depth: self.depth as i64,
        };

        // Coordinates are carried as i32 during carving and neighbour checks
        let limit = i32::MAX as u32;
        if [self.width, self.height, self.depth]
            .iter()
            .any(|&d| d == 0 || d > limit)
        {
            return Err(invalid_dimensions());
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|plane| plane.checked_mul(self.depth as usize))
            .ok_or_else(invalid_dimensions)?;

        if !self.threshold.is_finite() {
            return Err(GeneratorError::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.noise.octaves == 0 {
            return Err(GeneratorError::InvalidConfig(
                "noise.octaves must be at least 1".to_string(),
            ));
        }
        if !(self.noise.lacunarity.is_finite() && self.noise.lacunarity > 0.0) {
            return Err(GeneratorError::InvalidConfig(format!(
                "noise.lacunarity must be positive, got {}",
                self.noise.lacunarity
            )));
        }
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
        if !finite(&self.noise.scale) || !finite(&[self.noise.persistence]) {
            return Err(GeneratorError::InvalidConfig(format!(
                "noise.scale and noise.persistence must be finite, got {:?} and {}",
                self.noise.scale, self.noise.persistence
            )));
        }
        if !finite(&self.biome.scale) || !finite(&[self.biome.persistence]) {
            return Err(GeneratorError::InvalidConfig(format!(
                "biome.scale and biome.persistence must be finite, got {:?} and {}",
                self.biome.scale, self.biome.persistence
            )));
        }
        if !self.features.probability.is_finite() {
            return Err(GeneratorError::InvalidConfig(format!(
                "features.probability must be finite, got {}",
                self.features.probability
            )));
        }
        if !(self.random_worms.thickness.is_finite() && self.random_worms.thickness >= 0.0) {
            return Err(GeneratorError::InvalidConfig(format!(
                "random_worms.thickness must be non-negative, got {}",
                self.random_worms.thickness
            )));
        }
        Ok(())
    }

    /// Grid extents as `[width, height, depth]`.
    pub fn dimensions(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dimensions(), [64, 64, 64]);
        assert_eq!(config.noise.octaves, 3);
        assert_eq!(config.biome.transition_y, 20);
        assert_eq!(config.carves.len(), 1);
    }

    #[test]
    fn test_with_dimensions_rejects_non_positive() {
        assert!(matches!(
            CaveConfig::with_dimensions(0, 10, 10, 0.0),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            CaveConfig::with_dimensions(10, -3, 10, 0.0),
            Err(GeneratorError::InvalidDimensions { width: -3, .. })
        ));
        assert!(CaveConfig::with_dimensions(4, 5, 6, 0.25).is_ok());
    }

    #[test]
    fn test_with_dimensions_argument_order() {
        let config = CaveConfig::with_dimensions(4, 5, 6, 0.25).unwrap();
        assert_eq!(config.depth, 4);
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 6);
        assert_eq!(config.threshold, 0.25);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            CaveConfig::from_json_str(r#"{ "width": 8, "height": 9, "depth": 10 }"#).unwrap();
        assert_eq!(config.dimensions(), [8, 9, 10]);
        assert_eq!(config.noise, NoiseParams::default());
        assert_eq!(config.polarity, SolidityPolarity::BelowThreshold);
    }

    #[test]
    fn test_json_round_trip_of_default() {
        let json = serde_json::to_string(&CaveConfig::default()).unwrap();
        let parsed = CaveConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, CaveConfig::default());
    }

    #[test]
    fn test_json_carves_and_polarity() {
        let json = r#"{
            "polarity": "above_threshold",
            "carves": [
                { "type": "corridor", "start": [0, 0, 0], "size": [2, 2, 2] },
                { "type": "worm", "start": [1.0, 1.0, 1.0], "direction": [1.0, 0.0, 0.0], "length": 5, "thickness": 1.5 }
            ]
        }"#;
        let config = CaveConfig::from_json_str(json).unwrap();
        assert_eq!(config.polarity, SolidityPolarity::AboveThreshold);
        assert_eq!(config.carves.len(), 2);
        assert!(matches!(config.carves[1], CarveOperation::Worm { length: 5, .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CaveConfig::from_json_str(r#"{ "width": 0 }"#),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            CaveConfig::from_json_str(r#"{ "noise": { "octaves": 0 } }"#),
            Err(GeneratorError::InvalidConfig(_))
        ));
        assert!(matches!(
            CaveConfig::from_json_str("not json"),
            Err(GeneratorError::Json(_))
        ));
    }

    #[test]
    fn test_non_finite_noise_parameters_rejected() {
        let mut config = CaveConfig::default();
        config.noise.persistence = f64::NAN;
        assert!(matches!(config.validate(), Err(GeneratorError::InvalidConfig(_))));

        let mut config = CaveConfig::default();
        config.noise.scale[1] = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = CaveConfig::default();
        config.biome.persistence = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CaveConfig::default();
        config.biome.scale[2] = f64::NEG_INFINITY;
        assert!(config.validate().is_err());
    }
}
