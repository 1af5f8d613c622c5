//! Game configuration constants and tunable parameters.
//!
//! Every section implements `Default`, and with the `serde` feature every
//! field is optional in the serialized form, so a partial TOML file only
//! overrides what it names.
use crate::grid::DoorRule;
use crate::render::Rgba;

/// Top-level tunables for one play session.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub view: ViewConfig,
    pub player: PlayerConfig,
    pub doors: DoorConfig,
    pub enemy: EnemyConfig,
    pub combat: CombatConfig,
    pub lighting: LightingConfig,
    pub rules: RuleConfig,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Tile codes in this range are doors; the offset from the first code selects the lock.
    pub const DOOR_CODES: core::ops::RangeInclusive<u16> = 6..=9;
    /// Number of viewing octants in an enemy sprite sheet.
    pub const ENEMY_OCTANTS: u8 = 8;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Camera projection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Eye height above the floor in tile units (0.5 = wall middle).
    pub eye_height: f32,
}

impl ViewConfig {
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            screen_width: 320,
            screen_height: 200,
            eye_height: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// Movement speed in tiles per second.
    pub speed: f32,
    /// Maximum turn per second when the turn intent is saturated, in radians.
    pub turn_rate: f32,
    /// Half the side of the player's collision square.
    pub half_extent: f32,
    pub max_health: u32,
    /// Distance from a pickup's tile center within which it is collected.
    pub pickup_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            turn_rate: 3.0,
            half_extent: 0.3,
            max_health: 100,
            pickup_radius: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DoorConfig {
    /// Open-amount change per second while opening or closing.
    pub transition_speed: f32,
    /// Seconds a fully open door stays open before trying to close.
    pub hold_open: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            transition_speed: 1.0,
            hold_open: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyConfig {
    pub max_health: u32,
    /// Seconds between AI decisions.
    pub think_interval: f32,
    /// Seconds each animation frame is shown.
    pub frame_duration: f32,
    /// Walking speed in tiles per second.
    pub move_speed: f32,
    pub attack_range: f32,
    /// Pain is entered with probability `1 / pain_chance_divisor` after a hit.
    pub pain_chance_divisor: u32,
    pub base_damage: u32,
    pub damage_spread: u32,
    /// Maximum angular deviation (radians) when aiming a walk at the player.
    pub walk_angle_error: f32,
    /// Longest single walk segment in tiles.
    pub walk_segment: f32,
    /// Enemies stop approaching once this close to the player.
    pub min_approach: f32,
    /// Fixed accuracy used in the enemy hit-chance falloff.
    pub accuracy: u32,
    /// Side of the enemy collision square.
    pub size: f32,
    /// Width / height of enemy sprite frames (used for hit-scan projection).
    pub sprite_aspect: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            think_interval: 0.5,
            frame_duration: 0.15,
            move_speed: 1.0,
            attack_range: 8.0,
            pain_chance_divisor: 3,
            base_damage: 8,
            damage_spread: 6,
            walk_angle_error: 0.35,
            walk_segment: 2.0,
            min_approach: 3.0,
            accuracy: 4,
            size: 0.5,
            sprite_aspect: 1.0,
        }
    }
}

/// Distance band for the quadratic hit-chance falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FalloffRange {
    pub min: f32,
    pub max: f32,
}

impl FalloffRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Falloff band for the player's shots.
    pub player_falloff: FalloffRange,
    /// Fraction of an enemy sprite's width that counts as its hit box.
    pub hitbox_fraction: f32,
    /// Radius (in samples' offset) around the enemy used for its sight rays.
    pub sight_sample_offset: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_falloff: FalloffRange::new(1.0, 64.0),
            hitbox_fraction: 0.27,
            sight_sample_offset: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightingConfig {
    /// Distance at which brightness reaches the ambient floor.
    pub falloff_radius: f32,
    /// Minimum brightness in `[0, 1]`.
    pub ambient: f32,
    /// Multiplier applied to horizontal-side wall hits.
    pub horizontal_side_factor: f32,
    /// Fill used when no floor texture is configured.
    pub floor_color: Rgba,
    /// Fill used when no ceiling texture is configured.
    pub ceiling_color: Rgba,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            falloff_radius: 8.0,
            ambient: 40.0 / 255.0,
            horizontal_side_factor: 0.7,
            floor_color: Rgba::rgb(100, 100, 100),
            ceiling_color: Rgba::rgb(40, 40, 40),
        }
    }
}

/// Which door-blocking rule each consumer of the ray marcher applies.
///
/// Rendering always uses [`DoorRule::Graded`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConfig {
    pub sight: DoorRule,
    pub collision: DoorRule,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            sight: DoorRule::Structural,
            collision: DoorRule::Structural,
        }
    }
}
