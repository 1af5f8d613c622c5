//! The play session: grid, doors, player, enemies and sprites.
//!
//! [`World`] owns every piece of mutable game state and advances it in a
//! fixed order once per frame (see [`World::update`]). Side effects that
//! leave the core (sounds, HUD messages) go through the [`Services`](crate::env::Services) handed
//! to each call.
mod commands;
mod level;
mod update;

pub use commands::{DoorToggle, Shot};
pub use level::{LevelData, LevelError, Placement, PlacementKind};

use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyId};
use crate::env::{PcgRng, RngSource};
use crate::geometry::{Vec2, normalize_angle};
use crate::grid::{DoorMap, DoorRule, Grid};
use crate::player::Player;
use crate::raycast::Occluders;
use crate::render::{Camera, DepthBuffer, FrameBuffer, SpriteTexture, TextureOracle, render_walls};
use crate::sprite::{SpriteKind, SpriteList, VisibleSprite, render_sprites};
use crate::weapon::WeaponRegistry;

/// Sprites closer than this are not drawn.
pub const SPRITE_NEAR: f32 = 0.2;

/// What a frame produced besides the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutput {
    pub depth: DepthBuffer,
    /// Sprites with at least one column drawn, far to near.
    pub sprites: Vec<VisibleSprite>,
}

#[derive(Debug)]
pub struct World<R = PcgRng> {
    config: GameConfig,
    weapons: WeaponRegistry,
    name: String,
    grid: Grid,
    doors: DoorMap,
    spawn: Vec2,
    spawn_angle: f32,
    player: Player,
    enemies: Vec<Enemy>,
    sprites: SpriteList,
    rng: R,
}

impl<R: RngSource> World<R> {
    /// Builds a session from loaded level data.
    ///
    /// Sprites and enemies on blocked tiles are logged and skipped; a
    /// malformed grid or a blocked player spawn rejects the level.
    pub fn new(
        level: LevelData,
        config: GameConfig,
        weapons: WeaponRegistry,
        rng: R,
    ) -> Result<Self, LevelError> {
        let grid = Grid::from_rows(level.rows)?;
        let doors = DoorMap::from_grid(&grid);
        if !doors.matches_grid(&grid) {
            return Err(LevelError::DoorMismatch);
        }
        if !grid.is_open(level.spawn.cell()) {
            return Err(LevelError::SpawnBlocked(level.spawn));
        }

        let mut sprites = SpriteList::new();
        for placement in &level.placements {
            if !grid.is_open(placement.cell) {
                tracing::warn!(cell = %placement.cell, "skipping sprite placed on a blocked tile");
                continue;
            }
            let position = placement.cell.center();
            match placement.kind {
                PlacementKind::Pickup(pickup) => {
                    sprites.add(position, SpriteTexture::Pickup(pickup), SpriteKind::Pickup(pickup));
                }
                PlacementKind::Decoration(letter) => {
                    sprites.add(position, SpriteTexture::Decoration(letter), SpriteKind::Decoration);
                }
            }
        }

        let mut enemies = Vec::with_capacity(level.enemy_spawns.len());
        for position in level.enemy_spawns {
            if !grid.is_open(position.cell()) {
                tracing::warn!(%position, "skipping enemy spawned on a blocked tile");
                continue;
            }
            let id = EnemyId(enemies.len() as u32);
            let sprite = sprites.add(
                position,
                SpriteTexture::Enemy { frame: 0, octant: 0 },
                SpriteKind::Enemy(id),
            );
            enemies.push(Enemy::new(id, sprite, position, 0.0, &config.enemy));
        }

        let player = Player::new(level.spawn, level.spawn_angle, &config.player);
        tracing::info!(
            level = %level.name,
            width = grid.width(),
            height = grid.height(),
            doors = doors.len(),
            enemies = enemies.len(),
            sprites = sprites.len(),
            "level loaded"
        );

        Ok(Self {
            config,
            weapons,
            name: level.name,
            grid,
            doors,
            spawn: level.spawn,
            spawn_angle: normalize_angle(level.spawn_angle),
            player,
            enemies,
            sprites,
            rng,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn weapons(&self) -> &WeaponRegistry {
        &self.weapons
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn doors(&self) -> &DoorMap {
        &self.doors
    }

    /// Direct door access for tools and scripted scenarios.
    pub fn doors_mut(&mut self) -> &mut DoorMap {
        &mut self.doors
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id.0 as usize)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id.0 as usize)
    }

    pub fn sprites(&self) -> &SpriteList {
        &self.sprites
    }

    /// Ray-marching view of the level under `rule`.
    pub fn occluders(&self, rule: DoorRule) -> Occluders<'_> {
        Occluders::new(&self.grid, &self.doors, rule)
    }

    /// The player's view onto a `width` x `height` screen.
    pub fn camera(&self, width: u32, height: u32) -> Camera {
        Camera::new(self.player.position, self.player.angle, &self.config.view, width, height)
    }

    /// Teleports the player, keeping doorway occupancy consistent.
    pub fn place_player(&mut self, position: Vec2, angle: f32) {
        self.doors.track_move(self.player.position.cell(), position.cell());
        self.player.position = position;
        self.player.angle = normalize_angle(angle);
        tracing::debug!(%position, angle, "player placed");
    }

    /// Draws walls, floor, ceiling and sprites into `frame`.
    pub fn render<T>(&self, textures: &T, frame: &mut FrameBuffer) -> RenderOutput
    where
        T: TextureOracle + ?Sized,
    {
        let camera = self.camera(frame.width(), frame.height());
        let mut depth = DepthBuffer::new(camera.width);
        let occluders = self.occluders(DoorRule::Graded);
        render_walls(&camera, &occluders, textures, &self.config.lighting, frame, &mut depth);
        let sprites = render_sprites(&camera, &self.sprites, textures, &depth, SPRITE_NEAR, frame);
        RenderOutput { depth, sprites }
    }

    /// Keeps an enemy's billboard in step with its body and animation.
    fn sync_enemy_sprite(sprites: &mut SpriteList, enemy: &Enemy) {
        if let Some(sprite) = sprites.get_mut(enemy.sprite) {
            sprite.position = enemy.position;
            sprite.texture = enemy.texture();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::geometry::GridCoord;
    use crate::pickup::PickupKind;
    use crate::render::NoTextures;

    pub(super) fn room() -> LevelData {
        LevelData::new(
            "room",
            vec![
                vec![1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 1],
                vec![1, 1, 1, 1, 1, 1],
            ],
            Vec2::new(1.5, 1.5),
            0.0,
        )
    }

    fn world(level: LevelData) -> World<ScriptedRng> {
        World::new(level, GameConfig::default(), WeaponRegistry::default(), ScriptedRng::new([1])).unwrap()
    }

    #[test]
    fn blocked_spawn_is_rejected() {
        let mut level = room();
        level.spawn = Vec2::new(0.5, 0.5);
        let result = World::new(level, GameConfig::default(), WeaponRegistry::default(), PcgRng::new(1));
        assert!(matches!(result, Err(LevelError::SpawnBlocked(_))));
    }

    #[test]
    fn misplaced_entities_are_skipped() {
        let level = room()
            .with_placement(GridCoord::new(0, 0), PlacementKind::Decoration('T'))
            .with_placement(GridCoord::new(3, 1), PlacementKind::Pickup(PickupKind::Health(10)))
            .with_enemy(Vec2::new(0.5, 2.5))
            .with_enemy(Vec2::new(4.5, 2.5));
        let world = world(level);
        assert_eq!(world.sprites().len(), 2);
        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.enemies()[0].id, EnemyId(0));
    }

    #[test]
    fn render_reports_full_depth_buffer() {
        let world = world(room());
        let mut frame = FrameBuffer::new(32, 20);
        let output = world.render(&NoTextures, &mut frame);
        assert_eq!(output.depth.len(), 32);
        assert!(output.depth.as_slice().iter().all(|d| d.is_finite()));
        // No sprite textures -> nothing drawn.
        assert!(output.sprites.is_empty());
    }

    #[test]
    fn place_player_moves_and_turns() {
        let mut world = world(room());
        world.place_player(Vec2::new(3.5, 2.5), 7.0);
        assert_eq!(world.player().cell(), GridCoord::new(3, 2));
        assert!(world.player().angle <= core::f32::consts::PI);
        assert!(world.doors().get(GridCoord::new(3, 2)).is_none());
    }
}
