//! Collaborators the world talks to but does not own.
//!
//! Randomness, sound and HUD output are injected here so the simulation stays
//! deterministic and free of global state.
mod rng;
mod services;

pub use rng::{PcgRng, RngSource, ScriptedRng};
pub use services::{
    FULL_VOLUME, HALF_VOLUME, HudEvent, HudSink, PlayerStatus, Recorder, Services, Silent,
    SoundCue, SoundPlayer,
};
