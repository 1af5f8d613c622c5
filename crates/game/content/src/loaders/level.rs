//! Level manifest loader.
//!
//! A manifest names the map and spawn files of one level and where the
//! player starts:
//!
//! ```toml
//! name = "Hangar"
//! map = "maps/hangar.txt"
//! enemies = "enemies/hangar.txt"
//! spawn = [1.5, 1.5]
//! angle = 0.0
//! decorations = ["T", "L"]
//! ```
//!
//! File paths are relative to the manifest's directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use raycast_core::{Grid, LevelData, LevelError, Vec2};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, MapLoader, SpawnLoader, read_file};
use crate::tokens::DecorationTable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelManifest {
    pub name: String,
    pub map: PathBuf,
    #[serde(default)]
    pub enemies: Option<PathBuf>,
    pub spawn: (f32, f32),
    /// Initial facing in degrees.
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub decorations: Vec<char>,
}

/// Loader for complete levels.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load_manifest(path: &Path) -> LoadResult<LevelManifest> {
        let content = read_file(path)?;
        toml::from_str(&content).with_context(|| format!("Failed to parse level manifest at {}", path.display()))
    }

    /// Load a manifest and everything it references into [`LevelData`].
    ///
    /// Rejects maps whose rows differ in length; a missing spawn list is
    /// an error, an absent one means no enemies.
    pub fn load(path: &Path) -> LoadResult<LevelData> {
        let manifest = Self::load_manifest(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        let decorations = DecorationTable::new(manifest.decorations.iter().copied());

        let layout = MapLoader::load(&base.join(&manifest.map), &decorations)?;
        Grid::from_rows(layout.rows.clone())
            .map_err(LevelError::from)
            .with_context(|| format!("Map {} of level {:?} is malformed", manifest.map.display(), manifest.name))?;

        let enemy_spawns = match &manifest.enemies {
            Some(file) => SpawnLoader::load(&base.join(file))?,
            None => Vec::new(),
        };

        let (x, y) = manifest.spawn;
        let mut level = LevelData::new(manifest.name, layout.rows, Vec2::new(x, y), manifest.angle.to_radians());
        level.placements = layout.placements;
        level.enemy_spawns = enemy_spawns;
        tracing::info!(
            level = %level.name,
            placements = level.placements.len(),
            enemies = level.enemy_spawns.len(),
            "level data loaded"
        );
        Ok(level)
    }
}
