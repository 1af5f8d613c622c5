//! Content loaders for reading game data from files.
//!
//! Each loader turns one file into a core type: TOML for configuration and
//! level manifests, RON for weapon tables and plain text for maps and spawn
//! lists. [`ContentFactory`] ties them to a data directory.

pub mod config;
pub mod factory;
pub mod level;
pub mod map;
pub mod weapons;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use level::{LevelLoader, LevelManifest};
pub use map::{MapLoader, SpawnLoader};
pub use weapons::WeaponLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
