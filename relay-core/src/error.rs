//! Error types for relay.
//!
//! Every variant here is a protocol-level failure: misuse of the
//! continuation contract or of the infrastructure around it. Failures of
//! the suspended work itself are ordinary data and travel inside
//! [`Outcome::Failure`](crate::outcome::Outcome::Failure), never through
//! this enum.

use thiserror::Error;

/// The main error type for relay operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    // =========================================================================
    // Contract Violations (E201-E209)
    // =========================================================================
    /// `resume_with` was called on a continuation that has already been
    /// resumed. The late outcome is discarded; the delivered one stands.
    #[error("E201: continuation already resumed; late outcome discarded")]
    AlreadyResumed,

    /// An operation returned `Completed` and also resumed its continuation,
    /// delivering the result through both channels.
    #[error("E202: dual delivery: operation completed synchronously and resumed its continuation")]
    DualDelivery,

    /// The outcome was already taken from this slot.
    #[error("E203: outcome already taken from this slot")]
    OutcomeTaken,

    // =========================================================================
    // Registry Errors (E210-E219)
    // =========================================================================
    /// A continuation is already parked under this hook ID.
    #[error("E210: hook ID '{hook_id}' already in use")]
    HookInUse {
        /// The colliding hook ID.
        hook_id: String,
    },

    /// No parked continuation exists for this hook ID.
    #[error("E211: no parked continuation for hook ID '{hook_id}'")]
    HookNotFound {
        /// The hook ID that was not found.
        hook_id: String,
    },

    // =========================================================================
    // Delivery Errors (E220-E229)
    // =========================================================================
    /// A bounded wait for an outcome expired before resumption.
    #[error("E220: timed out after {waited_ms}ms waiting for an outcome")]
    OutcomeTimeout {
        /// How long the caller waited, in milliseconds.
        waited_ms: u64,
    },

    /// A background producer panicked before resuming its continuation.
    #[error("E221: background producer panicked before resuming its continuation")]
    ProducerPanicked,
}

impl RelayError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyResumed => "E201",
            Self::DualDelivery => "E202",
            Self::OutcomeTaken => "E203",
            Self::HookInUse { .. } => "E210",
            Self::HookNotFound { .. } => "E211",
            Self::OutcomeTimeout { .. } => "E220",
            Self::ProducerPanicked => "E221",
        }
    }

    /// Check if this error is a violation of the at-most-once contract,
    /// as opposed to a registry lookup or delivery failure.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyResumed | Self::DualDelivery | Self::OutcomeTaken
        )
    }
}

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;
