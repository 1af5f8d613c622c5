//! Enemies: body, health, perception flags and animation.
//!
//! Decision making and per-frame movement live in [`ai`]; the world feeds
//! each enemy its collision probe, line of sight and damage.
mod ai;

pub use ai::ProcessEvents;

use core::f32::consts::{FRAC_PI_4, FRAC_PI_8};

use crate::collision::Probe;
use crate::config::EnemyConfig;
use crate::geometry::{GridCoord, Vec2, normalize_angle};
use crate::render::SpriteTexture;
use crate::sprite::SpriteId;

/// Index of an enemy in the world's enemy list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EnemyState {
    Idle,
    Walk,
    Shoot,
    Pain,
    Dead,
}

impl EnemyState {
    /// Sprite-sheet frames of this state's animation.
    pub const fn frames(self) -> &'static [u8] {
        match self {
            Self::Idle => &[0],
            Self::Walk => &[1, 2, 3, 4],
            Self::Shoot => &[5, 6, 7],
            Self::Pain => &[8, 9],
            Self::Dead => &[10, 11, 12, 13],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub sprite: SpriteId,
    pub position: Vec2,
    /// Facing in radians.
    pub angle: f32,
    pub health: u32,
    spawn: Vec2,
    spawn_angle: f32,
    state: EnemyState,
    /// A locked state runs to completion before the next decision.
    locked: bool,
    walking: bool,
    destination: Vec2,
    can_see_player: bool,
    alerted: bool,
    just_damaged: bool,
    think_timer: f32,
    frame_index: usize,
    frame_time: f32,
    /// Death animation has played out.
    finished: bool,
    octant: u8,
    door_request: Option<GridCoord>,
    pending_damage: u32,
}

impl Enemy {
    pub fn new(id: EnemyId, sprite: SpriteId, position: Vec2, angle: f32, config: &EnemyConfig) -> Self {
        Self {
            id,
            sprite,
            position,
            angle: normalize_angle(angle),
            health: config.max_health,
            spawn: position,
            spawn_angle: normalize_angle(angle),
            state: EnemyState::Idle,
            locked: false,
            walking: false,
            destination: position,
            can_see_player: false,
            alerted: false,
            just_damaged: false,
            think_timer: 0.0,
            frame_index: 0,
            frame_time: 0.0,
            finished: false,
            octant: 0,
            door_request: None,
            pending_damage: 0,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    /// No health left. Dead enemies neither block nor can be targeted.
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// The death animation has finished; the enemy is now scenery.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn can_see_player(&self) -> bool {
        self.can_see_player
    }

    pub fn is_alerted(&self) -> bool {
        self.alerted
    }

    pub fn cell(&self) -> GridCoord {
        self.position.cell()
    }

    /// Sprite-sheet frame currently shown.
    pub fn current_frame(&self) -> u8 {
        let frames = self.state.frames();
        frames[self.frame_index.min(frames.len() - 1)]
    }

    /// Which of eight views of this enemy the player sees, 0 = facing the player.
    pub fn octant(&self) -> u8 {
        self.octant
    }

    pub fn texture(&self) -> SpriteTexture {
        SpriteTexture::Enemy {
            frame: self.current_frame(),
            octant: self.octant,
        }
    }

    pub fn set_can_see_player(&mut self, visible: bool) {
        self.can_see_player = visible;
    }

    /// Gunfire nearby: the enemy will hunt the player even without sight.
    pub fn alert(&mut self) {
        if !self.alerted && !self.is_dead() {
            tracing::debug!(enemy = self.id.0, "alerted");
            self.alerted = true;
        }
    }

    /// Applies damage. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = crate::combat::apply_damage(self.health, amount);
        self.just_damaged = true;
        self.is_dead()
    }

    /// Reports the per-frame collision probe for the proposed step. Anything
    /// but clear cancels the walk; a closed door is also queued for opening.
    pub fn block_walk(&mut self, probe: Probe) {
        match probe {
            Probe::Clear => {}
            Probe::Wall => self.cancel_walk(),
            Probe::Door(cell) => {
                self.cancel_walk();
                self.door_request = Some(cell);
            }
        }
    }

    fn cancel_walk(&mut self) {
        self.walking = false;
        self.locked = false;
    }

    /// Door the enemy wants opened, cleared on read.
    pub fn take_door_request(&mut self) -> Option<GridCoord> {
        self.door_request.take()
    }

    /// Damage from a finished shot, cleared on read.
    pub fn take_pending_damage(&mut self) -> u32 {
        core::mem::take(&mut self.pending_damage)
    }

    /// Back to the spawn point with full health and a clear mind.
    pub fn reset(&mut self, config: &EnemyConfig) {
        *self = Self::new(self.id, self.sprite, self.spawn, self.spawn_angle, config);
    }

    fn set_state(&mut self, state: EnemyState, lock: bool) {
        self.locked = lock;
        if self.state == state {
            return;
        }
        tracing::debug!(enemy = self.id.0, from = %self.state, to = %state, "state change");
        self.state = state;
        self.frame_index = 0;
        self.frame_time = 0.0;
    }

    fn update_octant(&mut self, player: Vec2) {
        let toward = (player - self.position).angle();
        let relative = normalize_angle(toward - self.angle);
        let sector = ((relative + FRAC_PI_8) / FRAC_PI_4).floor() as i32;
        self.octant = sector.rem_euclid(8) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Enemy {
        Enemy::new(
            EnemyId(0),
            SpriteId(0),
            Vec2::new(2.5, 2.5),
            0.0,
            &EnemyConfig::default(),
        )
    }

    #[test]
    fn octant_zero_when_facing_player() {
        let mut e = enemy();
        e.update_octant(Vec2::new(5.5, 2.5));
        assert_eq!(e.octant(), 0);
        e.update_octant(Vec2::new(2.5, 5.5));
        assert_eq!(e.octant(), 2);
        e.update_octant(Vec2::new(-1.0, 2.5));
        assert_eq!(e.octant(), 4);
        e.update_octant(Vec2::new(2.5, -1.0));
        assert_eq!(e.octant(), 6);
    }

    #[test]
    fn damage_is_monotonic_and_kills_once() {
        let mut e = enemy();
        assert!(!e.take_damage(40));
        assert_eq!(e.health, 60);
        assert!(e.take_damage(90));
        assert_eq!(e.health, 0);
        assert!(!e.take_damage(10));
    }

    #[test]
    fn door_block_queues_request() {
        let mut e = enemy();
        e.block_walk(Probe::Door(GridCoord::new(3, 2)));
        assert!(!e.is_walking());
        assert_eq!(e.take_door_request(), Some(GridCoord::new(3, 2)));
        assert_eq!(e.take_door_request(), None);
    }

    #[test]
    fn reset_restores_spawn_with_the_loaded_health() {
        let config = EnemyConfig {
            max_health: 150,
            ..EnemyConfig::default()
        };
        let mut e = Enemy::new(EnemyId(0), SpriteId(0), Vec2::new(2.5, 2.5), 0.0, &config);
        e.position = Vec2::new(4.0, 4.0);
        e.take_damage(100);
        e.alert();
        e.reset(&config);
        assert_eq!(e.position, Vec2::new(2.5, 2.5));
        assert_eq!(e.health, 150);
        assert_eq!(e.state(), EnemyState::Idle);
        assert!(!e.is_alerted());
    }
}
