//! Combat resolution.
//!
//! Pure functions over an injected [`RngSource`](crate::env::RngSource).
//! Both sides of the fight use the same quadratic hit-chance falloff; only
//! the accuracy and the damage roll differ.
//!
//! # Core Functions
//!
//! - `miss_divisor`: distance-weighted chance-of-miss divisor
//! - `roll_hit`: hit check against that divisor
//! - `roll_damage`: damage for a successful hit
//! - `resolve_attack`: hit check followed by damage

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{DamageRoll, apply_damage, roll_damage};
pub use hit::{miss_divisor, roll_hit};
pub use result::{AttackOutcome, AttackProfile, resolve_attack};
