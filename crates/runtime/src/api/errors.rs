//! Unified error types surfaced by the runtime API.
use std::path::PathBuf;

use raycast_core::{ErrorSeverity, GameError, LevelError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content from {}: {reason:#}", dir.display())]
    Content { dir: PathBuf, reason: anyhow::Error },

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("input source failed")]
    Input(#[source] std::io::Error),

    #[error("presenter failed")]
    Present(#[source] std::io::Error),

    #[error("runtime requires a world before building")]
    MissingWorld,

    #[error("runtime requires an input source before building")]
    MissingInput,

    #[error("runtime requires a presenter before building")]
    MissingPresenter,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content { .. } => ErrorSeverity::Validation,
            Self::Level(error) => error.severity(),
            Self::Input(_) | Self::Present(_) => ErrorSeverity::Fatal,
            Self::MissingWorld | Self::MissingInput | Self::MissingPresenter => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Content { .. } => "RUNTIME_CONTENT",
            Self::Level(error) => error.error_code(),
            Self::Input(_) => "RUNTIME_INPUT",
            Self::Present(_) => "RUNTIME_PRESENT",
            Self::MissingWorld => "RUNTIME_MISSING_WORLD",
            Self::MissingInput => "RUNTIME_MISSING_INPUT",
            Self::MissingPresenter => "RUNTIME_MISSING_PRESENTER",
        }
    }
}
