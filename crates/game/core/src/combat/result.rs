//! Attack outcome and resolution.

use crate::config::FalloffRange;
use crate::env::RngSource;

use super::damage::{DamageRoll, roll_damage};
use super::hit::roll_hit;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Miss,
    Hit { damage: u32 },
}

impl AttackOutcome {
    /// Damage dealt, 0 for a miss.
    pub fn damage(self) -> u32 {
        match self {
            Self::Miss => 0,
            Self::Hit { damage } => damage,
        }
    }
}

/// Everything needed to resolve one attacker's shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackProfile {
    pub accuracy: u32,
    pub falloff: FalloffRange,
    pub damage: DamageRoll,
}

/// Resolve a shot over `distance`: hit check, then damage.
pub fn resolve_attack(profile: &AttackProfile, distance: f32, rng: &mut (impl RngSource + ?Sized)) -> AttackOutcome {
    if !roll_hit(profile.accuracy, distance, profile.falloff, rng) {
        return AttackOutcome::Miss;
    }
    AttackOutcome::Hit {
        damage: roll_damage(profile.damage, rng),
    }
}
