//! Turn engine operation errors.
//!
//! All three variants are caller defects (wrong phase, card outside the
//! offered batch, blank topic); they are rejected loudly and never silently
//! ignored. Generator failures are not engine errors: they travel through
//! `apply_batch` / `apply_summary` as data.

use thiserror::Error;

use crate::session::Phase;

/// Error from a turn engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Operation invoked in a phase that does not allow it.
    #[error("{operation} is not allowed while the session is {phase}")]
    InvalidPhase {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Phase the session was in.
        phase: Phase,
    },

    /// Selected card id is not part of the current options.
    #[error("card {0:?} is not among the offered options")]
    CardNotOffered(String),

    /// Topic was empty after trimming.
    #[error("topic must not be empty")]
    EmptyTopic,
}
