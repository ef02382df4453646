//! # Feature Placement Module
//!
//! Picks marker positions (crystal spawn points) on cave floors. A cell is a
//! candidate when it is open and the cell directly below it is solid; each
//! candidate is then kept independently with a fixed probability. There is no
//! spacing guarantee, so dense floors produce clustered markers.

use cgmath::Point3;
use log::{debug, warn};

use super::cave_builder::CaveVolume;

/// Scans `volume` for floor cells and keeps each with chance `probability`.
///
/// The lowest layer is skipped since it has nothing below it. Probabilities
/// outside `[0, 1]` are clamped.
pub fn place_markers(
    volume: &CaveVolume,
    probability: f32,
    rng: &mut fastrand::Rng,
) -> Vec<Point3<f32>> {
    let probability = if probability.is_nan() {
        warn!("Marker probability is NaN, placing no markers");
        0.0
    } else if !(0.0..=1.0).contains(&probability) {
        warn!("Marker probability {} clamped to [0, 1]", probability);
        probability.clamp(0.0, 1.0)
    } else {
        probability
    };

    let [width, height, depth] = volume.dimensions();
    let mut candidates = 0usize;
    let mut markers = Vec::new();

    for z in 0..depth as i32 {
        for y in 1..height as i32 {
            for x in 0..width as i32 {
                if volume.is_solid(x, y - 1, z) && !volume.is_solid(x, y, z) {
                    candidates += 1;
                    if rng.f32() < probability {
                        markers.push(Point3::new(x as f32, y as f32, z as f32));
                    }
                }
            }
        }
    }

    debug!(
        "Placed {} markers from {} floor candidates (p = {})",
        markers.len(),
        candidates,
        probability
    );
    markers
}
