//! Software column renderer.
//!
//! One ray per screen column draws the wall slice, the floor below it and the
//! ceiling above it, and records the corrected distance in a [`DepthBuffer`]
//! that the sprite pass tests against.
mod camera;
mod floor;
mod frame;
mod texture;
mod walls;

pub use camera::{Camera, wall_brightness};
pub use frame::{DepthBuffer, FrameBuffer};
pub use texture::{NoTextures, Rgba, SpriteTexture, Texture, TextureOracle};
pub use walls::{ColumnCast, cast_column, render_walls};
