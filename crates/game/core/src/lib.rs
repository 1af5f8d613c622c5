//! Raycasting engine core: grid world, ray marcher, renderer and gameplay.
//!
//! `raycast-core` holds the rules shared by every front end. It renders into
//! an in-memory [`FrameBuffer`] and talks to the outside world only through
//! the narrow traits in [`env`] (sound, HUD, textures, randomness), so it
//! performs no I/O of its own. All session state lives in [`World`], which is
//! advanced by [`World::update`] once per frame.
pub mod collision;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod env;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pickup;
pub mod player;
pub mod raycast;
pub mod render;
pub mod sprite;
pub mod weapon;
pub mod world;

pub use collision::{Axis, Collider, MoveOutcome, Probe, squares_overlap};
pub use combat::{
    AttackOutcome, AttackProfile, DamageRoll, miss_divisor, resolve_attack, roll_damage, roll_hit,
};
pub use config::{
    CombatConfig, DoorConfig, EnemyConfig, FalloffRange, GameConfig, LightingConfig, PlayerConfig,
    RuleConfig, ViewConfig,
};
pub use enemy::{Enemy, EnemyId, EnemyState, ProcessEvents};
pub use env::{
    FULL_VOLUME, HALF_VOLUME, HudEvent, HudSink, PcgRng, PlayerStatus, Recorder, RngSource,
    ScriptedRng, Services, Silent, SoundCue, SoundPlayer,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{GridCoord, Vec2, normalize_angle};
pub use grid::{
    Door, DoorLock, DoorMap, DoorRule, DoorTransition, Grid, GridError, KeyColor, TileKind,
};
pub use pickup::PickupKind;
pub use player::{KeyRing, Player, PlayerIntent};
pub use raycast::{CellProbe, HitSide, Occluders, Traversal, march, perpendicular_distance};
pub use render::{
    Camera, ColumnCast, DepthBuffer, FrameBuffer, NoTextures, Rgba, SpriteTexture, Texture,
    TextureOracle, cast_column, render_walls,
};
pub use sprite::{Sprite, SpriteId, SpriteKind, SpriteList, SpriteProjection, VisibleSprite};
pub use weapon::{Arsenal, FireBlocked, MAX_AMMO, WeaponDef, WeaponKind, WeaponRegistry};
pub use world::{
    DoorToggle, LevelData, LevelError, Placement, PlacementKind, RenderOutput, Shot, World,
};
