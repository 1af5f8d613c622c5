//! Hit chance falloff.

use crate::config::FalloffRange;
use crate::env::RngSource;

/// Chance-of-miss divisor for a shot over `distance`.
///
/// # Formula
///
/// ```text
/// t       = (clamp(distance, min, max) - min) / (max - min)
/// divisor = floor((accuracy - 1) * (1 - t²)) + 1
/// ```
///
/// A shot hits when a uniform draw in `0..divisor` is non-zero, so the
/// divisor is never below 1 and a divisor of 1 always misses.
pub fn miss_divisor(accuracy: u32, distance: f32, range: FalloffRange) -> u32 {
    let span = (range.max - range.min).max(f32::EPSILON);
    let d = distance.clamp(range.min, range.max);
    let t = (d - range.min) / span;
    let scaled = (accuracy.saturating_sub(1)) as f32 * (1.0 - t * t);
    scaled.max(0.0).floor() as u32 + 1
}

/// Rolls a hit for a shot over `distance`.
pub fn roll_hit(accuracy: u32, distance: f32, range: FalloffRange, rng: &mut (impl RngSource + ?Sized)) -> bool {
    let divisor = miss_divisor(accuracy, distance, range);
    rng.below(divisor) != 0
}
