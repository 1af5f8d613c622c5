//! One simulation step.
use crate::collision::{Collider, Probe, squares_overlap};
use crate::env::{FULL_VOLUME, HALF_VOLUME, HudEvent, RngSource, Services, SoundCue};
use crate::geometry::Vec2;
use crate::grid::DoorTransition;
use crate::player::PlayerIntent;
use crate::raycast::Occluders;
use crate::sprite::SpriteKind;

use super::World;

impl<R: RngSource> World<R> {
    /// Advances the session by `dt` seconds.
    ///
    /// Order within a frame: player turning, weapon select, movement and
    /// doorway occupancy, door interaction, firing, then each enemy in turn
    /// (AI, collision check and step, door requests, sight, damage), door
    /// animation, pickups and finally the HUD status.
    pub fn update(&mut self, intent: &PlayerIntent, dt: f32, services: &mut Services<'_>) {
        if self.player.is_alive() {
            self.update_player(intent, dt, services);
        }
        self.update_enemies(dt, services);

        for transition in self.doors.tick(dt, &self.config.doors) {
            if let DoorTransition::StartedClosing(_) = transition {
                services.sound.play(SoundCue::DoorClose, FULL_VOLUME);
            }
        }

        if self.player.is_alive() {
            self.collect_pickups(services);
        }
        services.hud.status(&self.player.status());
    }

    fn update_player(&mut self, intent: &PlayerIntent, dt: f32, services: &mut Services<'_>) {
        self.player.arsenal.tick(dt);
        let turn = intent.turn.clamp(-1.0, 1.0);
        self.player.turn(turn * self.config.player.turn_rate * dt);

        if let Some(kind) = intent.select {
            if !self.player.arsenal.equip(kind) {
                tracing::debug!(weapon = %kind, "weapon not owned");
            }
        }

        let movement = if intent.movement.length_squared() > 1.0 {
            intent.movement.normalized().unwrap_or_default()
        } else {
            intent.movement
        };
        let motion = self
            .player
            .world_motion(movement, self.config.player.speed * dt);
        if motion != Vec2::ZERO {
            let start = self.player.position;
            let half = self.player.half_extent;
            let enemy_half = self.config.enemy.size / 2.0;
            let enemies = &self.enemies;
            let collider = Collider::new(&self.grid, &self.doors, self.config.rules.collision);
            // Moving into a live enemy is refused, but moving away from one we
            // already touch is not.
            let outcome = collider.resolve(start, half, motion, |candidate| {
                enemies.iter().filter(|enemy| !enemy.is_dead()).any(|enemy| {
                    squares_overlap(candidate, half, enemy.position, enemy_half)
                        && !squares_overlap(start, half, enemy.position, enemy_half)
                })
            });
            self.doors.track_move(start.cell(), outcome.position.cell());
            self.player.position = outcome.position;
        }

        if intent.interact {
            let cell = self.player.facing_cell();
            self.toggle_door_near(cell, services);
        }

        if intent.fire {
            if let Err(blocked) = self.fire_weapon(services) {
                tracing::trace!(%blocked, "trigger pulled without a shot");
            }
        }
    }

    fn update_enemies(&mut self, dt: f32, services: &mut Services<'_>) {
        let sight_offset = self.config.combat.sight_sample_offset;

        for index in 0..self.enemies.len() {
            let player = self.player.position;
            let before = self.enemies[index].cell();

            let events = self.enemies[index].process(dt, player, &self.config.enemy, &mut self.rng);
            if events.started_shooting {
                services.sound.play(SoundCue::EnemyShoot, FULL_VOLUME);
            }

            // Checked after thinking so a walk planned this frame is stopped too.
            let step = self.check_enemy_step(index, dt);
            let enemy = &mut self.enemies[index];
            if let Some(step) = step {
                enemy.block_walk(step);
                enemy.walk(dt, &self.config.enemy);
            }

            if let Some(cell) = enemy.take_door_request() {
                if let Some(door) = self.doors.get_mut(cell) {
                    if !door.lock.is_locked() && !door.is_animating() && door.begin_opening() {
                        tracing::debug!(enemy = enemy.id.0, %cell, "enemy opened door");
                        services.sound.play(SoundCue::DoorOpen, FULL_VOLUME);
                    }
                }
            }

            let visible = !enemy.is_dead()
                && self.player.is_alive()
                && Occluders::new(&self.grid, &self.doors, self.config.rules.sight)
                    .line_of_sight_sampled(enemy.position, player, sight_offset);
            enemy.set_can_see_player(visible);

            let damage = enemy.take_pending_damage();
            if damage > 0 && enemy.can_see_player() && self.player.is_alive() {
                self.player.take_damage(damage);
                services.sound.play(SoundCue::PlayerHurt, FULL_VOLUME);
                services.hud.notify(HudEvent::PlayerHurt(damage));
                tracing::debug!(enemy = enemy.id.0, damage, health = self.player.health, "player hit");
                if !self.player.is_alive() {
                    services.hud.notify(HudEvent::PlayerDied);
                    tracing::info!("player died");
                }
            }

            if events.died {
                self.doors.set_vacant(enemy.cell(), true);
            } else if !enemy.is_dead() {
                self.doors.track_move(before, enemy.cell());
            }
            Self::sync_enemy_sprite(&mut self.sprites, enemy);
        }
    }

    /// Collision result for the step enemy `index` wants to take, `None` when
    /// it is not walking. The live player and other live enemies block like
    /// walls; moving away from a body already touched is allowed.
    fn check_enemy_step(&self, index: usize, dt: f32) -> Option<Probe> {
        let enemy = &self.enemies[index];
        let step = enemy.proposed_step(dt, &self.config.enemy)?;
        let half = self.config.enemy.size / 2.0;

        let collider = Collider::new(&self.grid, &self.doors, self.config.rules.collision);
        let hit = collider.probe_step(enemy.position, half, step);
        if !hit.is_clear() {
            return Some(hit);
        }

        let start = enemy.position;
        let target = start + step;
        let blocks = |other: Vec2, other_half: f32| {
            squares_overlap(target, half, other, other_half) && !squares_overlap(start, half, other, other_half)
        };
        let player_blocks = self.player.is_alive() && blocks(self.player.position, self.player.half_extent);
        let enemy_blocks = self
            .enemies
            .iter()
            .enumerate()
            .any(|(other, body)| other != index && !body.is_dead() && blocks(body.position, half));
        Some(if player_blocks || enemy_blocks { Probe::Wall } else { Probe::Clear })
    }

    fn collect_pickups(&mut self, services: &mut Services<'_>) {
        let position = self.player.position;
        let radius = self.config.player.pickup_radius;
        for sprite in self.sprites.iter_mut() {
            let SpriteKind::Pickup(pickup) = sprite.kind else {
                continue;
            };
            if !sprite.active || sprite.position.distance(position) >= radius {
                continue;
            }
            if pickup.apply(&mut self.player, &self.weapons) {
                sprite.active = false;
                services.sound.play(SoundCue::Pickup, HALF_VOLUME);
                services.hud.notify(HudEvent::Collected(pickup));
                tracing::debug!(?pickup, "collected");
            }
        }
    }
}
