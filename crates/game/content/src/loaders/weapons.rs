//! Weapon table loader.

use std::path::Path;

use anyhow::Context;
use raycast_core::{WeaponDef, WeaponRegistry};

use crate::loaders::{LoadResult, read_file};

/// Loader for weapon definitions from RON files.
///
/// File format: a list of [`WeaponDef`]. Kinds the file leaves out keep
/// their built-in definition.
///
/// ```ron
/// [
///     (kind: Pistol, multiplier: 2, accuracy: 4, starting_ammo: Some(30),
///      range: 70.0, cooldown: 0.3, alert_radius: 16.0),
/// ]
/// ```
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<WeaponRegistry> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse weapon RON at {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<WeaponRegistry> {
        let defs: Vec<WeaponDef> = ron::from_str(content)?;
        for def in &defs {
            anyhow::ensure!(def.range > 0.0, "weapon {} has non-positive range", def.kind);
            anyhow::ensure!(def.cooldown >= 0.0, "weapon {} has negative cooldown", def.kind);
        }
        Ok(WeaponRegistry::from_defs(defs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raycast_core::WeaponKind;

    #[test]
    fn listed_weapons_override_defaults() {
        let registry = WeaponLoader::parse(
            "[(kind: Rifle, multiplier: 5, accuracy: 8, starting_ammo: Some(20), \
              range: 40.0, cooldown: 1.0, alert_radius: 30.0)]",
        )
        .unwrap();
        assert_eq!(registry.get(WeaponKind::Rifle).multiplier, 5);
        assert_eq!(registry.get(WeaponKind::Rifle).starting_ammo, Some(20));
        assert_eq!(registry.get(WeaponKind::Pistol), WeaponRegistry::default().get(WeaponKind::Pistol));
    }

    #[test]
    fn zero_range_is_rejected() {
        let error = WeaponLoader::parse(
            "[(kind: Knife, multiplier: 1, accuracy: 100, starting_ammo: None, \
              range: 0.0, cooldown: 0.1, alert_radius: 0.0)]",
        )
        .unwrap_err();
        assert!(error.to_string().contains("knife"));
    }
}
