//! Common error infrastructure for hanoi-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `IntegrityError`) live next to the
//! transitions and types they validate. This module provides the shared
//! classification used by hosts to decide how to surface a failure.
//!
//! # Design Principles
//!
//! - **Typed outcomes**: every rejection is a variant, never a panic
//! - **Severity Classification**: expected rejections are separated from
//!   internal faults so hosts can present the former and log the latter
//! - **Deterministic**: no error carries wall-clock or I/O state

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: expected, frequent outcomes (illegal move, empty undo)
/// - **Validation**: invalid input that should not be retried unchanged
/// - **Internal**: an engine invariant did not hold; indicates a bug
/// - **Fatal**: state is unusable and must be replaced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the player can simply try something else.
    ///
    /// Examples: disk too large for target tower, undo with empty history
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: disk count out of range, corrupted save slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: selection no longer on top of its tower, history desync
    Internal,

    /// Fatal error - game state corrupted, cannot continue.
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

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all hanoi-core errors.
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
    /// This is useful for error categorization, logging, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
