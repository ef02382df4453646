//! # Carving Module
//!
//! Operations that force regions of a [`DensityGrid`] open. Two shapes exist:
//!
//! * **Corridor**: an axis-aligned box, clipped to the grid.
//! * **Worm**: a wandering path that opens a sphere around every step. The
//!   heading is nudged by the injected noise each step, so a worm is fully
//!   determined by its parameters and the noise function.
//!
//! Carving only ever writes the open sentinel. A cell opened by an earlier
//! operation stays open whatever runs after it. Requests that fall partly or
//! wholly outside the grid are clipped silently.

use cgmath::{InnerSpace, Vector3};
use log::{debug, warn};
use noise::NoiseFn;
use serde::{Deserialize, Serialize};

use crate::core::config::RandomWormParams;

use super::density::DensityGrid;

/// Largest change a single step may apply to each axis of a worm's heading.
pub const WORM_TURN_LIMIT: f32 = 0.1;
/// Scale from worm position to noise space when sampling the turn.
const WORM_NOISE_SCALE: f64 = 0.1;
/// Per-axis offsets so the three turn components sample unrelated noise.
const WORM_AXIS_OFFSETS: [f64; 3] = [0.0, 71.3, 142.9];

/// A single carve, in the order it will be applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarveOperation {
    /// Opens the box `[start, start + size)` on every axis
    Corridor {
        /// Minimum corner `[x, y, z]`
        start: [i32; 3],
        /// Extent `[width, height, depth]`
        size: [i32; 3],
    },
    /// Opens a sphere of radius `thickness` around each of `length` steps
    Worm {
        /// Starting position
        start: [f32; 3],
        /// Initial heading; normalized before use
        direction: [f32; 3],
        /// Number of steps
        length: u32,
        /// Carve radius; each step advances half of it
        thickness: f32,
    },
}

impl CarveOperation {
    /// Builds a worm at a random position inside a grid of `dimensions` with
    /// a random, mostly horizontal heading.
    pub fn random_worm(
        rng: &mut fastrand::Rng,
        dimensions: [usize; 3],
        params: &RandomWormParams,
    ) -> Self {
        let start = [
            rng.f32() * dimensions[0] as f32,
            rng.f32() * dimensions[1] as f32,
            rng.f32() * dimensions[2] as f32,
        ];
        let yaw = rng.f32() * std::f32::consts::TAU;
        let pitch = (rng.f32() - 0.5) * 0.6;
        let direction = [yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()];

        CarveOperation::Worm {
            start,
            direction,
            length: params.length,
            thickness: params.thickness,
        }
    }

    /// Applies this operation, writing `open_density` into every carved cell.
    ///
    /// Returns the number of cell writes that landed inside the grid.
    pub fn apply<N: NoiseFn<f64, 3>>(
        &self,
        grid: &mut DensityGrid,
        noise: &N,
        open_density: f32,
    ) -> usize {
        let carved = match *self {
            CarveOperation::Corridor { start, size } => {
                carve_corridor(grid, start, size, open_density)
            }
            CarveOperation::Worm {
                start,
                direction,
                length,
                thickness,
            } => carve_worm(
                grid,
                noise,
                start.into(),
                direction.into(),
                length,
                thickness,
                open_density,
            ),
        };
        debug!("{:?} carved {} cells", self, carved);
        carved
    }
}

/// Opens every cell of the box starting at `start` with extent `size`,
/// clipped to the grid. Non-positive sizes carve nothing.
pub fn carve_corridor(
    grid: &mut DensityGrid,
    start: [i32; 3],
    size: [i32; 3],
    open_density: f32,
) -> usize {
    let range = |axis: usize| {
        let lo = start[axis] as i64;
        grid.clamp_range(axis, lo, lo + size[axis] as i64)
    };
    let (xs, ys, zs) = (range(0), range(1), range(2));

    let mut carved = 0;
    for z in zs {
        for y in ys.clone() {
            for x in xs.clone() {
                if grid.set(x, y, z, open_density) {
                    carved += 1;
                }
            }
        }
    }
    carved
}

/// Opens every cell whose integer coordinate lies within `radius` of `center`.
pub fn carve_sphere(
    grid: &mut DensityGrid,
    center: Vector3<f32>,
    radius: f32,
    open_density: f32,
) -> usize {
    let range = |axis: usize| {
        let lo = (center[axis] - radius).floor() as i64;
        let hi = ((center[axis] + radius).ceil() as i64).saturating_add(1);
        grid.clamp_range(axis, lo, hi)
    };
    let (xs, ys, zs) = (range(0), range(1), range(2));
    let radius_squared = radius * radius;

    let mut carved = 0;
    for z in zs {
        for y in ys.clone() {
            for x in xs.clone() {
                let offset = Vector3::new(x as f32, y as f32, z as f32) - center;
                if offset.magnitude2() <= radius_squared && grid.set(x, y, z, open_density) {
                    carved += 1;
                }
            }
        }
    }
    carved
}

/// Walks a worm for `length` steps, carving a sphere of `thickness` around
/// each new position.
///
/// Each step adds a noise-derived turn of at most [`WORM_TURN_LIMIT`] per
/// axis, renormalizes the heading, then advances by `thickness / 2`.
pub fn carve_worm<N: NoiseFn<f64, 3>>(
    grid: &mut DensityGrid,
    noise: &N,
    start: Vector3<f32>,
    direction: Vector3<f32>,
    length: u32,
    thickness: f32,
    open_density: f32,
) -> usize {
    let finite = |v: Vector3<f32>| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
    if !(thickness.is_finite() && thickness >= 0.0) || !finite(start) || !finite(direction) {
        warn!(
            "Skipping worm with non-finite parameters (start {:?}, direction {:?}, thickness {})",
            start, direction, thickness
        );
        return 0;
    }

    let mut position = start;
    let mut heading = normalize_or_x(direction);
    let step = thickness * 0.5;

    let mut carved = 0;
    for _ in 0..length {
        heading = normalize_or_x(heading + turn_at(noise, position));
        position += heading * step;
        carved += carve_sphere(grid, position, thickness, open_density);
    }
    carved
}

fn turn_at<N: NoiseFn<f64, 3>>(noise: &N, position: Vector3<f32>) -> Vector3<f32> {
    let mut turn = Vector3::new(0.0, 0.0, 0.0);
    for axis in 0..3 {
        let offset = WORM_AXIS_OFFSETS[axis];
        let sample = noise.get([
            position.x as f64 * WORM_NOISE_SCALE + offset,
            position.y as f64 * WORM_NOISE_SCALE + offset,
            position.z as f64 * WORM_NOISE_SCALE + offset,
        ]);
        turn[axis] = WORM_TURN_LIMIT * (sample as f32).clamp(-1.0, 1.0);
    }
    turn
}

fn normalize_or_x(v: Vector3<f32>) -> Vector3<f32> {
    let length = v.magnitude();
    if length > f32::EPSILON && length.is_finite() {
        v / length
    } else {
        Vector3::new(1.0, 0.0, 0.0)
    }
}
