//! Traits front ends implement to feed and display the frame loop.
use std::io;

use raycast_core::{FrameBuffer, PlayerIntent, RenderOutput};

use crate::services::HudLog;

/// Everything the input device asks for in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub intent: PlayerIntent,
    /// Put the level back to its loaded state before updating.
    pub restart: bool,
    /// Leave the frame loop without updating.
    pub quit: bool,
}

impl FrameInput {
    pub const QUIT: Self = Self {
        intent: PlayerIntent {
            movement: raycast_core::Vec2::ZERO,
            turn: 0.0,
            fire: false,
            interact: false,
            select: None,
        },
        restart: false,
        quit: true,
    };
}

/// Samples the player's controls once per frame.
///
/// Called on the frame loop's thread; implementations must not block.
pub trait InputSource {
    /// `dt` is the delta of the frame about to run, for sources that decay
    /// held keys over time.
    fn poll(&mut self, dt: f32) -> io::Result<FrameInput>;
}

/// A finished frame, borrowed for presentation.
pub struct FrameView<'a> {
    pub frame: &'a FrameBuffer,
    pub output: &'a RenderOutput,
    pub hud: &'a HudLog,
    pub level: &'a str,
    /// Zero-based index of this frame since the loop started.
    pub index: u64,
    pub dt: f32,
}

/// Shows finished frames.
pub trait Presenter {
    /// Pixel size the next frame should be rendered at. `None` keeps the
    /// current size.
    fn viewport(&mut self) -> Option<(u32, u32)> {
        None
    }

    fn present(&mut self, view: &FrameView<'_>) -> io::Result<()>;
}
