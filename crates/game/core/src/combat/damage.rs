//! Damage rolls and application.

use crate::env::RngSource;

/// How damage is rolled after a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageRoll {
    /// `uniform(0..32) * multiplier`; used by player weapons.
    Scaled { multiplier: u32 },
    /// `base + uniform(-spread/2 ..= spread/2)`, never below 0; used by enemies.
    Spread { base: u32, spread: u32 },
}

/// Rolls damage for a successful hit.
pub fn roll_damage(roll: DamageRoll, rng: &mut (impl RngSource + ?Sized)) -> u32 {
    match roll {
        DamageRoll::Scaled { multiplier } => rng.below(32) * multiplier,
        DamageRoll::Spread { base, spread } => {
            let half = (spread / 2) as i32;
            let jitter = rng.range(-half, half);
            (base as i32 + jitter).max(0) as u32
        }
    }
}

/// Apply damage to current health, clamped at 0.
pub fn apply_damage(current: u32, damage: u32) -> u32 {
    current.saturating_sub(damage)
}
