//! Enemy decisions (on the think tick) and per-frame animation and walking.
use crate::combat::{DamageRoll, roll_damage, roll_hit};
use crate::config::{EnemyConfig, FalloffRange};
use crate::env::RngSource;
use crate::geometry::Vec2;

use super::{Enemy, EnemyState};

/// What happened to an enemy during one [`Enemy::process`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessEvents {
    pub started_shooting: bool,
    pub entered_pain: bool,
    pub died: bool,
}

impl EnemyConfig {
    /// Distance band for the enemy's shoot decision.
    pub fn falloff(&self) -> FalloffRange {
        FalloffRange::new(3.0, self.attack_range + 1.0)
    }
}

impl Enemy {
    /// Displacement the enemy wants to make this frame, `None` when not walking.
    ///
    /// The world checks it after [`Enemy::process`] and reports back through
    /// [`Enemy::block_walk`] before calling [`Enemy::walk`].
    pub fn proposed_step(&self, dt: f32, config: &EnemyConfig) -> Option<Vec2> {
        if !self.walking || self.is_dead() {
            return None;
        }
        let step = config.move_speed * dt;
        let remaining = self.destination - self.position;
        if remaining.length_squared() <= step * step {
            Some(remaining)
        } else {
            Some(Vec2::from_angle(self.angle) * step)
        }
    }

    /// Advances timers and animation by `dt`, thinking when the think
    /// interval has elapsed. Movement happens separately in [`Enemy::walk`].
    pub fn process<R>(&mut self, dt: f32, player: Vec2, config: &EnemyConfig, rng: &mut R) -> ProcessEvents
    where
        R: RngSource + ?Sized,
    {
        let mut events = ProcessEvents::default();
        if self.finished {
            return events;
        }

        if self.is_dead() && self.state != EnemyState::Dead {
            self.walking = false;
            self.set_state(EnemyState::Dead, true);
            events.died = true;
        }

        self.update_octant(player);

        if !self.locked {
            self.think_timer += dt;
        }
        if self.think_timer > config.think_interval {
            self.think_timer = 0.0;
            let before = self.state;
            self.think(player, config, rng);
            if self.state != before {
                events.started_shooting = self.state == EnemyState::Shoot;
                events.entered_pain = self.state == EnemyState::Pain;
            }
        }

        self.animate(dt, config, rng);
        events
    }

    fn think<R>(&mut self, player: Vec2, config: &EnemyConfig, rng: &mut R)
    where
        R: RngSource + ?Sized,
    {
        if self.locked {
            return;
        }

        if self.just_damaged {
            self.just_damaged = false;
            if rng.chance_one_in(config.pain_chance_divisor) {
                self.walking = false;
                self.set_state(EnemyState::Pain, true);
                return;
            }
        }

        let distance = self.position.distance(player);
        let in_range = distance <= config.attack_range;
        if self.can_see_player && in_range && roll_hit(config.accuracy, distance, config.falloff(), rng) {
            self.walking = false;
            self.set_state(EnemyState::Shoot, true);
            return;
        }

        if self.can_see_player || self.alerted {
            if !self.walking {
                self.plan_walk(player, distance, config, rng);
            }
            return;
        }

        self.set_state(EnemyState::Idle, false);
    }

    /// Heads toward the player with a bounded random error, one segment at a time.
    fn plan_walk<R>(&mut self, player: Vec2, distance: f32, config: &EnemyConfig, rng: &mut R)
    where
        R: RngSource + ?Sized,
    {
        if distance < config.min_approach {
            return;
        }
        let error = (rng.unit_f32() * 2.0 - 1.0) * config.walk_angle_error;
        let heading = (player - self.position).angle() + error;
        let length = distance.min(config.walk_segment);
        self.destination = self.position + Vec2::from_angle(heading) * length;
        self.angle = crate::geometry::normalize_angle(heading);
        self.walking = true;
        self.set_state(EnemyState::Walk, true);
    }

    fn animate<R>(&mut self, dt: f32, config: &EnemyConfig, rng: &mut R)
    where
        R: RngSource + ?Sized,
    {
        if self.state == EnemyState::Idle {
            self.frame_index = 0;
            self.frame_time = 0.0;
            return;
        }

        self.frame_time += dt;
        while self.frame_time > config.frame_duration {
            self.frame_time -= config.frame_duration;
            let count = self.state.frames().len();
            self.frame_index = (self.frame_index + 1) % count;
            if self.frame_index + 1 != count {
                continue;
            }

            match self.state {
                EnemyState::Dead => {
                    self.finished = true;
                    self.locked = true;
                    tracing::debug!(enemy = self.id.0, "death animation finished");
                    return;
                }
                EnemyState::Shoot => {
                    self.pending_damage = roll_damage(
                        DamageRoll::Spread {
                            base: config.base_damage,
                            spread: config.damage_spread,
                        },
                        rng,
                    );
                    self.finish_action();
                    return;
                }
                EnemyState::Pain => {
                    self.finish_action();
                    return;
                }
                EnemyState::Walk if !self.walking => {
                    self.locked = false;
                    self.think_timer = 0.0;
                    self.frame_time = 0.0;
                }
                _ => {}
            }
        }
    }

    fn finish_action(&mut self) {
        self.think_timer = 0.0;
        self.set_state(EnemyState::Idle, false);
    }

    /// Takes the step from [`Enemy::proposed_step`]. Only call it once that
    /// step has been checked; a blocked step has already stopped the walk.
    pub fn walk(&mut self, dt: f32, config: &EnemyConfig) {
        let Some(step) = self.proposed_step(dt, config) else {
            return;
        };
        let reach = config.move_speed * dt;
        if self.position.distance_squared(self.destination) <= reach * reach {
            self.position = self.destination;
            self.walking = false;
            self.set_state(EnemyState::Idle, false);
        } else {
            self.position += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Probe;
    use crate::enemy::EnemyId;
    use crate::env::ScriptedRng;
    use crate::sprite::SpriteId;

    fn config() -> EnemyConfig {
        EnemyConfig::default()
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(EnemyId(0), SpriteId(0), Vec2::new(x, y), 0.0, &config())
    }

    /// Runs `process` until the think timer just crosses its interval.
    fn think_once(enemy: &mut Enemy, player: Vec2, rng: &mut ScriptedRng) -> ProcessEvents {
        enemy.process(config().think_interval - 0.01, player, &config(), rng);
        enemy.process(0.02, player, &config(), rng)
    }

    #[test]
    fn unaware_enemy_idles() {
        let mut enemy = enemy_at(2.5, 2.5);
        let mut rng = ScriptedRng::new([1]);
        think_once(&mut enemy, Vec2::new(6.5, 2.5), &mut rng);
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert!(!enemy.is_walking());
    }

    #[test]
    fn visible_player_in_range_draws_fire() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.set_can_see_player(true);
        // Non-zero draw passes the shoot roll.
        let mut rng = ScriptedRng::new([1]);
        let events = think_once(&mut enemy, Vec2::new(6.5, 2.5), &mut rng);
        assert!(events.started_shooting);
        assert_eq!(enemy.state(), EnemyState::Shoot);
        assert!(enemy.is_locked());
    }

    #[test]
    fn finished_shot_rolls_damage_once() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.set_can_see_player(true);
        let mut rng = ScriptedRng::new([1]);
        think_once(&mut enemy, Vec2::new(6.5, 2.5), &mut rng);

        let frame = config().frame_duration;
        let mut damage = 0;
        for _ in 0..4 {
            enemy.process(frame + 0.001, Vec2::new(6.5, 2.5), &config(), &mut rng);
            damage += enemy.take_pending_damage();
        }
        assert!((5..=11).contains(&damage));
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert!(!enemy.is_locked());
    }

    #[test]
    fn alerted_enemy_walks_toward_player() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.alert();
        // unit_f32 of this value is ~0.5 -> no angular error
        let mut rng = ScriptedRng::new([1u32 << 31]);
        think_once(&mut enemy, Vec2::new(10.5, 2.5), &mut rng);
        assert_eq!(enemy.state(), EnemyState::Walk);
        assert!(enemy.is_walking());
        let dest = enemy.destination();
        assert!((dest.x - 4.5).abs() < 1e-3);
        assert!((dest.y - 2.5).abs() < 1e-3);
    }

    #[test]
    fn close_enough_stops_approaching() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.alert();
        let mut rng = ScriptedRng::new([1u32 << 31]);
        think_once(&mut enemy, Vec2::new(4.5, 2.5), &mut rng);
        assert!(!enemy.is_walking());
    }

    #[test]
    fn walking_arrives_and_snaps() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.alert();
        let mut rng = ScriptedRng::new([1u32 << 31]);
        let player = Vec2::new(10.5, 2.5);
        think_once(&mut enemy, player, &mut rng);

        for _ in 0..30 {
            if let Some(step) = enemy.proposed_step(0.1, &config()) {
                assert!(step.length() <= 0.1 + 1e-5);
            }
            enemy.process(0.1, player, &config(), &mut rng);
            enemy.walk(0.1, &config());
            if !enemy.is_walking() {
                break;
            }
        }
        assert_eq!(enemy.position, enemy.destination());
    }

    #[test]
    fn blocked_walk_holds_position_and_unlocks() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.alert();
        let mut rng = ScriptedRng::new([1u32 << 31]);
        let player = Vec2::new(10.5, 2.5);
        think_once(&mut enemy, player, &mut rng);
        let before = enemy.position;

        enemy.block_walk(Probe::Wall);
        enemy.process(0.05, player, &config(), &mut rng);
        enemy.walk(0.05, &config());
        assert_eq!(enemy.position, before);
        assert_eq!(enemy.state(), EnemyState::Walk);
        assert!(!enemy.is_locked());
        assert!(!enemy.is_walking());
    }

    #[test]
    fn death_is_forced_and_final() {
        let mut enemy = enemy_at(2.5, 2.5);
        let mut rng = ScriptedRng::new([1]);
        enemy.take_damage(500);
        let events = enemy.process(0.01, Vec2::new(6.5, 2.5), &config(), &mut rng);
        assert!(events.died);
        assert_eq!(enemy.state(), EnemyState::Dead);

        for _ in 0..10 {
            enemy.process(config().frame_duration + 0.001, Vec2::new(6.5, 2.5), &config(), &mut rng);
        }
        assert!(enemy.is_finished());
        assert_eq!(enemy.current_frame(), 13);
    }

    #[test]
    fn pain_interrupts_when_roll_passes() {
        let mut enemy = enemy_at(2.5, 2.5);
        enemy.take_damage(10);
        // 0 % 3 == 0 -> pain
        let mut rng = ScriptedRng::new([0]);
        let events = think_once(&mut enemy, Vec2::new(20.5, 2.5), &mut rng);
        assert!(events.entered_pain);
        assert_eq!(enemy.state(), EnemyState::Pain);
    }
}
