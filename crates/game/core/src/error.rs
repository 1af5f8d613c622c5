//! Common error infrastructure for raycast-core.
//!
//! Queries against the world (ray marches, collision probes, door lookups)
//! never fail: out-of-bounds and missing entries resolve to a conservative
//! "blocked" answer and are logged. The error types here are only returned
//! while building a world from content, where bad data can still be rejected.
//!
//! Domain-specific errors (e.g., `GridError`, `LevelError`) are defined in
//! their respective modules alongside the data they validate.

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the offending entity or row can be skipped
/// - **Validation**: invalid content that should be fixed at the source
/// - **Internal**: inconsistent engine state (a bug)
/// - **Fatal**: the world cannot be built at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The offending piece of content can be skipped or substituted.
    ///
    /// Examples: unknown map token, spawn outside the grid
    Recoverable,

    /// Invalid content, rejected without retry.
    ///
    /// Examples: ragged map rows, empty grid
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: door-coded tile without a door entry
    Internal,

    /// Fatal error - nothing playable can be constructed.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all raycast-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
