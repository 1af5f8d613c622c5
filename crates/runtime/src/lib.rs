//! Frame loop driving a raycast-core session.
//!
//! The runtime owns the [`World`](raycast_core::World), samples an
//! [`InputSource`] once per tick, advances the simulation, renders into a
//! frame buffer and hands the result to a [`Presenter`]. Front ends only
//! implement those two traits.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the frame loop and its builder
//! - [`api`] exposes the traits and errors front ends interact with
//! - [`clock`] measures frame deltas
//! - [`services`] implements the core's sound and HUD sinks
//! - [`session`] loads a world from a content directory
pub mod api;
pub mod clock;
pub mod config;
pub mod runtime;
pub mod services;
pub mod session;

pub use api::{FrameInput, FrameView, InputSource, Presenter, Result, RuntimeError};
pub use clock::FrameClock;
pub use config::RuntimeConfig;
pub use runtime::{Flow, Runtime, RuntimeBuilder};
pub use services::{HudLog, HudMessage, LoggedSound, describe_event};
pub use session::load_world;
