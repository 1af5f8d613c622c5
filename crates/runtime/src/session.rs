//! Session bootstrap from a content directory.
use raycast_content::ContentFactory;
use raycast_core::{PcgRng, World};

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;

/// Loads the configured level and builds a seeded world from it.
pub fn load_world(config: &RuntimeConfig) -> Result<World<PcgRng>> {
    let factory = ContentFactory::new(&config.content_dir);
    let content = factory
        .load(&config.level)
        .map_err(|reason| RuntimeError::Content {
            dir: config.content_dir.clone(),
            reason,
        })?;
    let world = World::new(
        content.level,
        content.config,
        content.weapons,
        PcgRng::new(config.seed),
    )?;
    tracing::info!(
        dir = %config.content_dir.display(),
        level = %world.name(),
        seed = config.seed,
        "session ready"
    );
    Ok(world)
}
