//! `raycast`: play a level in the terminal.
//!
//! ```bash
//! RAYCAST_LEVEL=e1m1 RUST_LOG=debug cargo run -p raycast-client
//! ```
use anyhow::Result;
use raycast_client::{
    ClientConfig, KeyboardInput, ProceduralTextures, TerminalPresenter, setup_logging, terminal,
};
use raycast_runtime::{Runtime, RuntimeConfig, load_world};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let _log_guard = setup_logging(&client_config)?;

    let runtime_config = RuntimeConfig::from_env();
    tracing::info!(
        content = %runtime_config.content_dir.display(),
        level = %runtime_config.level,
        "starting raycast"
    );

    // Load before touching the terminal so content errors print normally.
    let world = load_world(&runtime_config)?;
    let textures = ProceduralTextures::new();
    tracing::debug!(sprites = textures.sprite_count(), "textures generated");

    let tui = terminal::init()?;
    let _terminal_guard = terminal::TerminalGuard;

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .world(world)
        .input(KeyboardInput::new(client_config.key_hold))
        .presenter(TerminalPresenter::new(tui, client_config.crosshair))
        .textures(textures)
        .build()?;

    let frames = runtime.run().await?;
    tracing::info!(frames, "raycast exiting");
    Ok(())
}
