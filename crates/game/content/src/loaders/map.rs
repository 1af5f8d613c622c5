//! Map and enemy spawn list loaders.
//!
//! Both formats are plain text; see [`crate::tokens`] for the grammar.

use std::path::Path;

use raycast_core::Vec2;

use crate::loaders::{LoadResult, read_file};
use crate::tokens::{DecorationTable, MapLayout, parse_map, parse_spawns};

/// Loader for tile maps.
pub struct MapLoader;

impl MapLoader {
    /// Load a map file, resolving scenery letters against `decorations`.
    ///
    /// Malformed tokens are logged and skipped here; the grid shape is only
    /// checked when the level is assembled.
    pub fn load(path: &Path, decorations: &DecorationTable) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        let layout = parse_map(&content, decorations);
        tracing::debug!(
            path = %path.display(),
            rows = layout.rows.len(),
            placements = layout.placements.len(),
            "map parsed"
        );
        Ok(layout)
    }
}

/// Loader for enemy spawn lists.
pub struct SpawnLoader;

impl SpawnLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Vec2>> {
        let content = read_file(path)?;
        Ok(parse_spawns(&content))
    }
}
