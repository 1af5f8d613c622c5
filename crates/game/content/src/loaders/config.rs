//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use raycast_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every section and field is optional; whatever the file leaves out
    /// keeps its default.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse config TOML at {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raycast_core::DoorRule;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [view]
            fov_degrees = 60.0

            [rules]
            sight = "graded"
            "#,
        )
        .unwrap();
        assert_eq!(config.view.fov_degrees, 60.0);
        assert_eq!(config.view.eye_height, 0.5);
        assert_eq!(config.rules.sight, DoorRule::Graded);
        assert_eq!(config.player, GameConfig::default().player);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(ConfigLoader::parse("[player]\nmax_health = \"lots\"").is_err());
    }
}
