//! Player-issued commands: fire, door toggle and restart.
use crate::combat::{AttackOutcome, resolve_attack};
use crate::enemy::EnemyId;
use crate::env::{FULL_VOLUME, HudEvent, RngSource, Services, SoundCue};
use crate::geometry::GridCoord;
use crate::grid::{DoorRule, KeyColor};
use crate::pickup::PickupKind;
use crate::render::{SpriteTexture, cast_column};
use crate::sprite::{SpriteKind, project};
use crate::weapon::{FireBlocked, WeaponKind};

use super::{SPRITE_NEAR, World};

/// Result of a trigger pull that actually fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub weapon: WeaponKind,
    /// Enemy under the crosshair, if any.
    pub target: Option<EnemyId>,
    /// Hit roll against the target.
    pub outcome: Option<AttackOutcome>,
    pub killed: bool,
}

/// What [`World::toggle_door_near`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorToggle {
    NoDoor,
    Opening,
    Closing,
    /// The door needs a key the player does not hold.
    Locked(KeyColor),
    /// Mid-animation or occupied; nothing changed.
    Busy,
}

impl<R: RngSource> World<R> {
    /// Fires the equipped weapon: consumes ammo, alerts nearby enemies and
    /// resolves a hit-scan against the enemy under the crosshair.
    pub fn fire_weapon(&mut self, services: &mut Services<'_>) -> Result<Shot, FireBlocked> {
        let kind = self.player.arsenal.fire(&self.weapons)?;
        let def = *self.weapons.get(kind);
        services.sound.play(SoundCue::Weapon(kind), FULL_VOLUME);
        services.hud.notify(HudEvent::WeaponFired(kind));
        self.alert_enemies(def.alert_radius);

        let mut shot = Shot {
            weapon: kind,
            target: None,
            outcome: None,
            killed: false,
        };
        let Some((target, distance)) = self.crosshair_target(def.range) else {
            tracing::debug!(weapon = %kind, "shot hit nothing");
            return Ok(shot);
        };

        let profile = def.attack_profile(self.config.combat.player_falloff);
        let outcome = resolve_attack(&profile, distance, &mut self.rng);
        tracing::debug!(weapon = %kind, enemy = target.0, distance, ?outcome, "shot resolved");
        shot.target = Some(target);
        shot.outcome = Some(outcome);
        if let AttackOutcome::Hit { damage } = outcome {
            shot.killed = self.damage_enemy(target, damage, services);
        }
        Ok(shot)
    }

    /// Nearest live enemy whose hit box covers the crosshair, in front of
    /// the wall under it and within `range`. Returns its id and distance.
    pub fn crosshair_target(&self, range: f32) -> Option<(EnemyId, f32)> {
        let view = &self.config.view;
        let camera = self.camera(view.screen_width, view.screen_height);
        let center = camera.center_column();
        let wall = cast_column(&camera, &self.occluders(DoorRule::Graded), center);
        let sight = self.occluders(self.config.rules.sight);

        self.enemies
            .iter()
            .filter(|enemy| !enemy.is_dead())
            .filter_map(|enemy| {
                let projection = project(&camera, enemy.position, self.config.enemy.sprite_aspect, SPRITE_NEAR)?;
                let hit = projection.distance < range
                    && projection.band_contains(center as f32, self.config.combat.hitbox_fraction)
                    && projection.depth < wall.depth
                    && sight.line_of_sight(self.player.position, enemy.position);
                hit.then_some((enemy.id, projection.distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Opens or closes the door at `cell` on the player's behalf.
    pub fn toggle_door_near(&mut self, cell: GridCoord, services: &mut Services<'_>) -> DoorToggle {
        let keys = self.player.keys;
        let Some(door) = self.doors.get_mut(cell) else {
            return DoorToggle::NoDoor;
        };

        if door.is_sealed() && !door.is_animating() {
            if let Some(color) = door.lock.required_key() {
                if !keys.holds(color) {
                    tracing::debug!(%cell, %color, "door locked");
                    services.hud.notify(HudEvent::DoorLocked(color));
                    return DoorToggle::Locked(color);
                }
            }
            door.begin_opening();
            services.sound.play(SoundCue::DoorOpen, FULL_VOLUME);
            tracing::debug!(%cell, "door opening");
            return DoorToggle::Opening;
        }

        if door.begin_closing() {
            services.sound.play(SoundCue::DoorClose, FULL_VOLUME);
            tracing::debug!(%cell, "door closing");
            return DoorToggle::Closing;
        }
        DoorToggle::Busy
    }

    /// Puts the level back to its loaded state. The player keeps nothing.
    pub fn restart_level(&mut self, services: &mut Services<'_>) {
        self.player.respawn(self.spawn, self.spawn_angle);
        self.doors.reset();
        self.sprites.remove_dynamic();
        self.sprites.reactivate_all();
        for enemy in &mut self.enemies {
            enemy.reset(&self.config.enemy);
            Self::sync_enemy_sprite(&mut self.sprites, enemy);
        }
        services.hud.notify(HudEvent::LevelRestarted);
        services.hud.status(&self.player.status());
        tracing::info!(level = %self.name, "level restarted");
    }

    fn alert_enemies(&mut self, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let origin = self.player.position;
        for enemy in &mut self.enemies {
            if !enemy.is_dead() && enemy.position.distance(origin) <= radius {
                enemy.alert();
            }
        }
    }

    /// Applies player damage to an enemy. A kill leaves an ammo drop behind.
    fn damage_enemy(&mut self, id: EnemyId, damage: u32, services: &mut Services<'_>) -> bool {
        let Some(enemy) = self.enemies.get_mut(id.0 as usize) else {
            return false;
        };
        if !enemy.take_damage(damage) {
            services.sound.play(SoundCue::EnemyPain, FULL_VOLUME);
            return false;
        }

        let weapon = if self.rng.below(2) == 0 {
            WeaponKind::Pistol
        } else {
            WeaponKind::Rifle
        };
        let drop = PickupKind::drop(weapon);
        let position = enemy.cell().center();
        self.sprites
            .spawn(position, SpriteTexture::Pickup(drop), SpriteKind::Pickup(drop));
        services.sound.play(SoundCue::EnemyDeath, FULL_VOLUME);
        services.hud.notify(HudEvent::EnemyKilled);
        tracing::info!(enemy = id.0, %position, "enemy killed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Recorder, ScriptedRng};
    use crate::geometry::Vec2;
    use crate::grid::DoorLock;
    use crate::player::KeyRing;
    use crate::weapon::WeaponRegistry;
    use crate::world::LevelData;

    fn hall() -> LevelData {
        LevelData::new(
            "hall",
            vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 1, 1, 8, 1, 1, 1, 1],
                vec![1, 1, 1, 0, 1, 1, 1, 1],
            ],
            Vec2::new(1.5, 1.5),
            0.0,
        )
    }

    fn world(level: LevelData, rolls: impl IntoIterator<Item = u32>) -> World<ScriptedRng> {
        World::new(level, GameConfig::default(), WeaponRegistry::default(), ScriptedRng::new(rolls.into_iter().collect::<Vec<_>>())).unwrap()
    }

    #[test]
    fn locked_door_needs_its_key() {
        let mut world = world(hall(), [1]);
        let (mut sound, mut hud) = (Recorder::default(), Recorder::default());
        let mut services = Services::new(&mut sound, &mut hud);
        let door = GridCoord::new(3, 2);
        assert_eq!(world.doors().get(door).map(|d| d.lock), Some(DoorLock::Key(KeyColor::Red)));

        assert_eq!(world.toggle_door_near(door, &mut services), DoorToggle::Locked(KeyColor::Red));
        world.player_mut().keys |= KeyRing::RED;
        assert_eq!(world.toggle_door_near(door, &mut services), DoorToggle::Opening);
        assert_eq!(world.toggle_door_near(door, &mut services), DoorToggle::Busy);
        assert_eq!(world.toggle_door_near(GridCoord::new(2, 1), &mut services), DoorToggle::NoDoor);
        drop(services);
        assert!(hud.saw(HudEvent::DoorLocked(KeyColor::Red)));
        assert!(sound.heard(SoundCue::DoorOpen));
    }

    #[test]
    fn kill_drops_ammo_and_restart_removes_it() {
        let level = hall().with_enemy(Vec2::new(4.5, 1.5));
        // below(2) == 1 -> rifle drop
        let mut world = world(level, [1]);
        let (mut sound, mut hud) = (Recorder::default(), Recorder::default());
        let mut services = Services::new(&mut sound, &mut hud);
        let pistol = *world.weapons().get(WeaponKind::Pistol);
        world.player_mut().arsenal.grant(&pistol);
        world.enemy_mut(EnemyId(0)).unwrap().health = 1;

        let shot = world.fire_weapon(&mut services).unwrap();
        assert_eq!(shot.target, Some(EnemyId(0)));
        assert!(shot.killed);
        assert_eq!(world.sprites().len(), 2);
        let dropped = world.sprites().iter().find(|s| s.dynamic).unwrap();
        assert_eq!(dropped.kind, SpriteKind::Pickup(PickupKind::drop(WeaponKind::Rifle)));
        assert_eq!(dropped.position, Vec2::new(4.5, 1.5));

        world.restart_level(&mut services);
        drop(services);
        assert_eq!(world.sprites().len(), 1);
        assert_eq!(world.enemies()[0].health, 100);
        assert_eq!(world.player().arsenal.equipped(), None);
        assert!(hud.saw(HudEvent::EnemyKilled));
        assert!(hud.saw(HudEvent::LevelRestarted));
        assert!(sound.heard(SoundCue::EnemyDeath));
    }

    #[test]
    fn crosshair_ignores_enemies_behind_walls_and_out_of_range() {
        let level = hall().with_enemy(Vec2::new(3.5, 3.5));
        let mut world = world(level, [1]);
        world.place_player(Vec2::new(3.5, 1.5), core::f32::consts::FRAC_PI_2);
        assert_eq!(world.crosshair_target(100.0), None);

        world.doors_mut().get_mut(GridCoord::new(3, 2)).unwrap().open_amount = 1.0;
        assert_eq!(world.crosshair_target(100.0).map(|t| t.0), Some(EnemyId(0)));
        assert_eq!(world.crosshair_target(1.0), None);
    }

    #[test]
    fn empty_gun_does_not_fire() {
        let mut world = world(hall(), [1]);
        let (mut sound, mut hud) = (Recorder::default(), Recorder::default());
        let mut services = Services::new(&mut sound, &mut hud);
        assert_eq!(world.fire_weapon(&mut services), Err(FireBlocked::Unarmed));
        drop(services);
        assert!(sound.sounds.is_empty());
    }
}
