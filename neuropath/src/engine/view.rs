//! Presentation view model derived from the session.

use serde::Serialize;

use crate::card::{KnowledgeCard, Summary};
use crate::session::{Phase, Session, TOTAL_ROUNDS};

/// Immutable snapshot handed to a presentation layer.
///
/// `round` is the 1-based round currently being played, clamped to
/// [`TOTAL_ROUNDS`]; `progress` is `round / total_rounds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: Phase,
    pub topic: String,
    pub round: u32,
    pub total_rounds: u32,
    pub progress: f32,
    pub options: Vec<KnowledgeCard>,
    pub summary: Option<Summary>,
}

impl SessionView {
    pub(crate) fn of(session: &Session) -> Self {
        let round = (session.completed_rounds() + 1).min(TOTAL_ROUNDS);
        Self {
            phase: session.phase(),
            topic: session.topic().to_string(),
            round,
            total_rounds: TOTAL_ROUNDS,
            progress: round as f32 / TOTAL_ROUNDS as f32,
            options: session.current_options().to_vec(),
            summary: session.summary().cloned(),
        }
    }
}
