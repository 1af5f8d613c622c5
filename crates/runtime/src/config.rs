//! Runtime configuration and environment overrides.
use std::env;
use std::path::PathBuf;

use crate::clock::FrameClock;

/// Settings for one run of the frame loop.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Directory holding `config.toml`, `weapons.ron` and `levels/`.
    pub content_dir: PathBuf,
    /// Level name under `levels/`, without extension.
    pub level: String,
    pub target_fps: u32,
    /// Longest frame delta handed to the simulation, in seconds.
    pub max_delta: f32,
    /// Seed for the session's random source.
    pub seed: u64,
    /// Stop after this many frames (headless runs and tests).
    pub max_frames: Option<u64>,
    /// HUD messages kept at once.
    pub hud_capacity: usize,
    /// Seconds a HUD message stays visible.
    pub hud_message_ttl: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("crates/game/content/data"),
            level: "e1m1".to_owned(),
            target_fps: FrameClock::DEFAULT_FPS,
            max_delta: FrameClock::MAX_DELTA,
            seed: 0x5EED,
            max_frames: None,
            hud_capacity: 4,
            hud_message_ttl: 2.5,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAYCAST_CONTENT_DIR` - Content data directory (default: crates/game/content/data)
    /// - `RAYCAST_LEVEL` - Level to load (default: e1m1)
    /// - `RAYCAST_TARGET_FPS` - Frame rate of the loop (default: 60)
    /// - `RAYCAST_SEED` - Random seed (default: fixed)
    /// - `RAYCAST_MAX_FRAMES` - Stop after this many frames (default: unbounded)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("RAYCAST_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(level) = env::var("RAYCAST_LEVEL") {
            config.level = level;
        }
        if let Some(fps) = read_env::<u32>("RAYCAST_TARGET_FPS") {
            config.target_fps = fps.max(1);
        }
        if let Some(seed) = read_env::<u64>("RAYCAST_SEED") {
            config.seed = seed;
        }
        config.max_frames = read_env::<u64>("RAYCAST_MAX_FRAMES");

        config
    }

    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.target_fps).with_max_delta(self.max_delta)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
