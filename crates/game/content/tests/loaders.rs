//! Loader tests against files on disk.
use std::fs;
use std::path::Path;

use raycast_content::{ContentFactory, LevelLoader};
use raycast_core::{
    DoorLock, GameConfig, GridCoord, KeyColor, PcgRng, PickupKind, PlacementKind, Vec2,
    WeaponKind, WeaponRegistry, World,
};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn small_level(dir: &Path, map: &str) {
    write(
        dir,
        "levels/test.toml",
        r#"
        name = "test"
        map = "../maps/test.txt"
        enemies = "../enemies/test.txt"
        spawn = [1.5, 1.5]
        angle = 90.0
        decorations = ["T"]
        "#,
    );
    write(dir, "maps/test.txt", map);
    write(dir, "enemies/test.txt", "# one guard\n3.5 1.5\nbad line\n");
}

#[test]
fn factory_loads_a_level_with_default_config() {
    let temp = TempDir::new().unwrap();
    small_level(temp.path(), "1 1 1 1 1\n1 0 G 0 1\n1 T 8 0 1\n1 1 1 1 1\n\n");

    let content = ContentFactory::new(temp.path()).load("test").unwrap();
    assert_eq!(content.config, GameConfig::default());
    assert_eq!(content.weapons, WeaponRegistry::default());

    let level = &content.level;
    assert_eq!(level.name, "test");
    assert_eq!(level.rows.len(), 4);
    assert_eq!(level.rows[2], vec![1, 0, 8, 0, 1]);
    assert_eq!(level.spawn, Vec2::new(1.5, 1.5));
    assert!((level.spawn_angle - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(level.enemy_spawns, vec![Vec2::new(3.5, 1.5)]);
    assert_eq!(level.placements.len(), 2);
    assert_eq!(level.placements[0].cell, GridCoord::new(2, 1));
    assert_eq!(
        level.placements[0].kind,
        PlacementKind::Pickup(PickupKind::Key(KeyColor::Gold))
    );
    assert_eq!(level.placements[1].kind, PlacementKind::Decoration('T'));
}

#[test]
fn ragged_map_is_rejected() {
    let temp = TempDir::new().unwrap();
    // The unknown letter is dropped, leaving row 1 one tile short.
    small_level(temp.path(), "1 1 1 1\n1 0 X 1\n1 1 1 1\n");

    let error = LevelLoader::load(&temp.path().join("levels/test.toml")).unwrap_err();
    assert!(format!("{error:#}").contains("row 1 has 3 tiles"), "{error:#}");
}

#[test]
fn missing_map_file_is_reported_with_its_path() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "levels/test.toml", "name = \"x\"\nmap = \"nowhere.txt\"\nspawn = [1.5, 1.5]\n");

    let error = ContentFactory::new(temp.path()).load_level("test").unwrap_err();
    assert!(format!("{error:#}").contains("nowhere.txt"));
}

#[test]
fn config_and_weapon_files_override_defaults() {
    let temp = TempDir::new().unwrap();
    small_level(temp.path(), "1 1 1\n1 0 1\n1 1 1\n");
    write(temp.path(), "config.toml", "[doors]\nhold_open = 5.0\n");
    write(
        temp.path(),
        "weapons.ron",
        "[(kind: Pistol, multiplier: 4, accuracy: 4, starting_ammo: Some(12), \
          range: 50.0, cooldown: 0.5, alert_radius: 10.0)]",
    );

    let factory = ContentFactory::new(temp.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.doors.hold_open, 5.0);
    assert_eq!(config.doors.transition_speed, 1.0);
    let weapons = factory.load_weapons().unwrap();
    assert_eq!(weapons.get(WeaponKind::Pistol).starting_ammo, Some(12));
    assert_eq!(factory.level_names().unwrap(), vec!["test".to_owned()]);
}

#[test]
fn broken_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "config.toml", "[view\nfov_degrees = 45");
    assert!(ContentFactory::new(temp.path()).load_config().is_err());
}

#[test]
fn shipped_content_builds_a_world() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let factory = ContentFactory::new(&data);
    assert!(factory.level_names().unwrap().contains(&"e1m1".to_owned()));

    let content = factory.load("e1m1").unwrap();
    let world = World::new(content.level, content.config, content.weapons, PcgRng::new(1)).unwrap();
    assert_eq!(world.enemies().len(), 5);
    assert_eq!(
        world.doors().get(GridCoord::new(3, 6)).map(|door| door.lock),
        Some(DoorLock::Key(KeyColor::Gold))
    );
    assert!(world.sprites().len() > world.enemies().len());
}
