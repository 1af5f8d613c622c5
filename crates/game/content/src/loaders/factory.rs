//! Content factory for building a session's inputs from data files.

use std::path::{Path, PathBuf};

use raycast_core::{GameConfig, LevelData, WeaponRegistry};

use crate::loaders::{ConfigLoader, LevelLoader, LoadResult, WeaponLoader};

/// Everything `World::new` needs besides a random source.
#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub config: GameConfig,
    pub weapons: WeaponRegistry,
    pub level: LevelData,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── weapons.ron      (optional)
/// ├── levels/
/// │   └── e1m1.toml
/// ├── maps/
/// │   └── e1m1.txt
/// └── enemies/
///     └── e1m1.txt
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load weapon definitions from `weapons.ron`, or defaults when absent.
    pub fn load_weapons(&self) -> LoadResult<WeaponRegistry> {
        let path = self.data_dir.join("weapons.ron");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no weapon table, using defaults");
            return Ok(WeaponRegistry::default());
        }
        WeaponLoader::load(&path)
    }

    /// Load a level from `levels/{level_name}.toml`.
    pub fn load_level(&self, level_name: &str) -> LoadResult<LevelData> {
        let path = self.data_dir.join("levels").join(format!("{level_name}.toml"));
        LevelLoader::load(&path)
    }

    /// Load configuration, weapons and one level.
    pub fn load(&self, level_name: &str) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            weapons: self.load_weapons()?,
            level: self.load_level(level_name)?,
        })
    }

    /// Names of the levels under `levels/`, sorted.
    pub fn level_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("levels");
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
