//! Session state: phase, topic, turn history, pending options.
//!
//! The `Session` is the only mutable state of the turn engine and is owned
//! exclusively by it; everything else in the crate derives from it.

use serde::{Deserialize, Serialize};

use crate::card::{KnowledgeCard, Summary, Turn};

/// Fixed number of rounds in a journey.
pub const TOTAL_ROUNDS: u32 = 8;

/// Number of cards offered per round.
pub const CARDS_PER_ROUND: usize = 3;

/// Session phase. `Idle` is initial; `Summary` is terminal until an explicit
/// reset returns to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No session running; waiting for a topic.
    #[default]
    Idle,
    /// A generator call is in flight; no user action is accepted.
    Loading,
    /// Options are on offer; waiting for the user's choice.
    Playing,
    /// The journey is complete and the summary is available.
    Summary,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Playing => "playing",
            Phase::Summary => "summary",
        };
        f.write_str(s)
    }
}

/// Mutable session state, owned by [`TurnEngine`](crate::engine::TurnEngine)
/// and mutated only through its operations.
///
/// Invariants: `history.len()` equals the number of completed rounds, rounds
/// are numbered 1..k with no gaps, and `current_options` holds the
/// not-yet-chosen batch for round `history.len() + 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub(crate) topic: String,
    pub(crate) phase: Phase,
    pub(crate) history: Vec<Turn>,
    pub(crate) current_options: Vec<KnowledgeCard>,
    pub(crate) summary: Option<Summary>,
}

impl Session {
    /// Fresh session for `topic`, parked in `Loading` until the initial batch
    /// arrives.
    pub(crate) fn begin(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            phase: Phase::Loading,
            history: Vec::new(),
            current_options: Vec::new(),
            summary: None,
        }
    }

    /// Topic being explored; empty while idle.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed turns in round order.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The batch on offer for the next round; empty while loading or idle.
    pub fn current_options(&self) -> &[KnowledgeCard] {
        &self.current_options
    }

    /// Terminal summary, present only in the `Summary` phase.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Number of completed rounds.
    pub fn completed_rounds(&self) -> u32 {
        self.history.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Default session is idle with nothing stored.
    #[test]
    fn default_session_is_idle_and_empty() {
        let s = Session::default();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.topic().is_empty());
        assert!(s.history().is_empty());
        assert!(s.current_options().is_empty());
        assert!(s.summary().is_none());
        assert_eq!(s.completed_rounds(), 0);
    }

    /// **Scenario**: begin() stores the topic and parks the session in Loading.
    #[test]
    fn begin_parks_in_loading() {
        let s = Session::begin("Coffee");
        assert_eq!(s.phase(), Phase::Loading);
        assert_eq!(s.topic(), "Coffee");
        assert!(s.history().is_empty());
    }

    /// **Scenario**: Phase Display matches the lowercase wire names.
    #[test]
    fn phase_display_lowercase() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Loading.to_string(), "loading");
        assert_eq!(Phase::Playing.to_string(), "playing");
        assert_eq!(Phase::Summary.to_string(), "summary");
    }
}
