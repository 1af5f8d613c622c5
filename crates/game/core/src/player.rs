//! The player: body, health, keys and weapons.
use bitflags::bitflags;

use crate::config::PlayerConfig;
use crate::env::PlayerStatus;
use crate::geometry::{GridCoord, Vec2, normalize_angle};
use crate::grid::KeyColor;
use crate::weapon::{Arsenal, WeaponKind};

bitflags! {
    /// Door keys the player carries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct KeyRing: u8 {
        const BLUE = 1 << 0;
        const RED  = 1 << 1;
        const GOLD = 1 << 2;
    }
}

impl KeyRing {
    pub const fn of(color: KeyColor) -> Self {
        match color {
            KeyColor::Blue => Self::BLUE,
            KeyColor::Red => Self::RED,
            KeyColor::Gold => Self::GOLD,
        }
    }

    pub fn holds(self, color: KeyColor) -> bool {
        self.contains(Self::of(color))
    }
}

/// What the input device asks for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    /// View-relative movement: `x` forward, `y` strafe right. Length at most 1.
    pub movement: Vec2,
    /// Turn input in `[-1, 1]`, scaled by the configured turn rate.
    /// Positive turns toward +angle.
    pub turn: f32,
    pub fire: bool,
    /// Open or close the door in front of the player.
    pub interact: bool,
    pub select: Option<WeaponKind>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Facing in radians, kept in `(-π, π]`.
    pub angle: f32,
    pub half_extent: f32,
    pub health: u32,
    pub max_health: u32,
    pub keys: KeyRing,
    pub arsenal: Arsenal,
}

impl Player {
    pub fn new(position: Vec2, angle: f32, config: &PlayerConfig) -> Self {
        Self {
            position,
            angle: normalize_angle(angle),
            half_extent: config.half_extent,
            health: config.max_health,
            max_health: config.max_health,
            keys: KeyRing::empty(),
            arsenal: Arsenal::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn cell(&self) -> GridCoord {
        self.position.cell()
    }

    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// The tile one unit ahead, used for door interaction.
    pub fn facing_cell(&self) -> GridCoord {
        (self.position + self.facing()).cell()
    }

    pub fn turn(&mut self, radians: f32) {
        self.angle = normalize_angle(self.angle + radians);
    }

    /// World-space displacement for a view-relative movement intent.
    pub fn world_motion(&self, movement: Vec2, distance: f32) -> Vec2 {
        let forward = self.facing();
        let right = Vec2::new(-forward.y, forward.x);
        (forward * movement.x + right * movement.y) * distance
    }

    /// Heals up to max health. Returns false at full health.
    pub fn heal(&mut self, amount: u32) -> bool {
        if self.health >= self.max_health {
            return false;
        }
        self.health = (self.health + amount).min(self.max_health);
        true
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = crate::combat::apply_damage(self.health, amount);
    }

    pub fn status(&self) -> PlayerStatus {
        let weapon = self.arsenal.equipped();
        PlayerStatus {
            health: self.health,
            weapon,
            ammo: weapon.and_then(|kind| self.arsenal.ammo(kind)),
            keys: self.keys,
        }
    }

    /// Back to spawn with full health and empty pockets.
    pub fn respawn(&mut self, position: Vec2, angle: f32) {
        self.position = position;
        self.angle = normalize_angle(angle);
        self.health = self.max_health;
        self.keys = KeyRing::empty();
        self.arsenal.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn strafe_right_is_clockwise_in_screen_space() {
        let player = Player::new(Vec2::new(1.5, 1.5), 0.0, &PlayerConfig::default());
        let motion = player.world_motion(Vec2::new(0.0, 1.0), 1.0);
        // Facing +X, right is +Y (rows grow downward).
        assert!((motion.x).abs() < 1e-6);
        assert!((motion.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn facing_cell_is_one_unit_ahead() {
        let mut player = Player::new(Vec2::new(1.5, 1.5), 0.0, &PlayerConfig::default());
        assert_eq!(player.facing_cell(), GridCoord::new(2, 1));
        player.turn(FRAC_PI_2);
        assert_eq!(player.facing_cell(), GridCoord::new(1, 2));
    }

    #[test]
    fn heal_caps_and_ignores_full_health() {
        let mut player = Player::new(Vec2::ZERO, 0.0, &PlayerConfig::default());
        assert!(!player.heal(10));
        player.take_damage(15);
        assert!(player.heal(25));
        assert_eq!(player.health, 100);
        player.take_damage(500);
        assert!(!player.is_alive());
    }

    #[test]
    fn key_ring_tracks_colors() {
        let mut keys = KeyRing::empty();
        keys |= KeyRing::of(KeyColor::Red);
        assert!(keys.holds(KeyColor::Red));
        assert!(!keys.holds(KeyColor::Gold));
    }
}
