//! Public API surface of the runtime crate.
//!
//! Front ends implement [`InputSource`] and [`Presenter`]; failures surface
//! as [`RuntimeError`].
mod errors;
mod io;

pub use errors::{Result, RuntimeError};
pub use io::{FrameInput, FrameView, InputSource, Presenter};
