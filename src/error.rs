//! Engine error taxonomy.
//!
//! Budget exhaustion and ambiguous solutions are ordinary retry signals,
//! handled inside the generation loop and never surfaced. The only error a
//! caller can observe is a grid-state defect detected by the solver.

use thiserror::Error;

/// Unrecoverable engine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The solver exhausted all outstanding obligations but could not seed a
    /// new obligation front within the sanity bound. This indicates a defect
    /// in grid-state transitions and must not be retried.
    #[error("solver could not seed a new obligation front within {max_advances} diagonal advances")]
    StalledFront {
        /// Number of diagonal advances attempted before giving up.
        max_advances: i32,
    },
}

/// Retry signal raised when one generation attempt spends its whole budget of
/// local backtracking failures. Caught by the generation loop, which restarts
/// from scratch with a fresh base shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttemptsExceeded;
