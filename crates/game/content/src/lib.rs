//! Data-driven level content and loaders.
//!
//! This crate turns files on disk into the inputs of a `raycast-core` session:
//! - Map layouts (plain text tile codes and sprite letters)
//! - Enemy spawn lists (plain text coordinate pairs)
//! - Level manifests (TOML)
//! - Game configuration (TOML)
//! - Weapon tables (RON)
//!
//! The text grammar in [`tokens`] has no I/O and is always available; file
//! loaders sit behind the `loaders` feature.

pub mod tokens;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tokens::{DecorationTable, MapLayout, parse_map, parse_spawns};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, LevelLoader, LevelManifest, LoadResult, MapLoader,
    SpawnLoader, WeaponLoader,
};
