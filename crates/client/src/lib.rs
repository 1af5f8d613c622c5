//! Terminal front end for the raycaster.
//!
//! Draws frames with ratatui half-block cells, reads the keyboard through
//! crossterm and supplies procedurally generated textures.
pub mod config;
pub mod input;
pub mod logging;
pub mod terminal;
pub mod textures;
pub mod ui;

pub use config::ClientConfig;
pub use input::KeyboardInput;
pub use logging::setup_logging;
pub use textures::ProceduralTextures;
pub use ui::TerminalPresenter;
