//! Request/response messages between the turn engine and a card generator.
//!
//! Engine operations return a [`GeneratorRequest`]; the caller resolves it
//! against a `CardGenerator` and feeds the result back through the engine's
//! `apply_*` operations. Each request carries a [`RequestToken`] tied to the
//! session generation, so a response that arrives after a reset is detectably
//! stale and discarded instead of being applied to the wrong session.

use crate::card::Turn;
use crate::generator::GenerationError;

/// Opaque token tying a generator request to the session generation that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub(crate) generation: u64,
}

/// A pending generator call, as issued by the engine.
///
/// Requests are self-contained snapshots: the history is cloned at issue
/// time, so resolving one never races with later engine mutations.
#[derive(Debug, Clone)]
pub enum GeneratorRequest {
    /// First batch for a fresh session (topic only).
    InitialBatch {
        token: RequestToken,
        topic: String,
    },
    /// Batch for `target_round`, conditioned on the path so far.
    NextBatch {
        token: RequestToken,
        topic: String,
        history: Vec<Turn>,
        target_round: u32,
    },
    /// Terminal summary over the full history.
    Summary {
        token: RequestToken,
        topic: String,
        history: Vec<Turn>,
    },
}

impl GeneratorRequest {
    /// Token to pass back to the matching `apply_*` call.
    pub fn token(&self) -> RequestToken {
        match self {
            GeneratorRequest::InitialBatch { token, .. }
            | GeneratorRequest::NextBatch { token, .. }
            | GeneratorRequest::Summary { token, .. } => *token,
        }
    }
}

/// What applying a generator response did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Batch accepted; options are on offer and the session is playing.
    OptionsReady,
    /// Summary stored (generated or fallback); the session is complete.
    SummaryReady,
    /// The opening batch failed; the session was discarded back to idle.
    Aborted {
        /// Why the batch was rejected.
        error: GenerationError,
    },
    /// A mid-game batch failed; the last turn was rolled back and its options
    /// restored, so re-selecting a card retries the fetch.
    RolledBack {
        /// Why the batch was rejected.
        error: GenerationError,
    },
    /// The response belonged to a previous session generation and was
    /// discarded without touching the session.
    Stale,
}
