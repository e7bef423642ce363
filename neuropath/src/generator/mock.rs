//! Scripted card generator for tests, examples, and offline runs.
//!
//! Deterministic batches with the `round{N}-opt{I}` id convention; failures
//! can be scripted per round to exercise the engine's error paths without a
//! network.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CardGenerator, GenerationError};
use crate::card::{KnowledgeCard, Summary, Turn};
use crate::session::CARDS_PER_ROUND;

const ICONS: [&str; 3] = ["🧠", "🔍", "🌱"];

/// Mock generator: fixed batches, scripted failures.
///
/// `batch(topic, round)` is deterministic, so tests can compare against the
/// exact cards the engine stored. A round listed via `with_failing_batch`
/// fails on its first request and succeeds afterwards, which is exactly the
/// shape the engine's rollback-and-retry path needs.
///
/// **Interaction**: Implements `CardGenerator`; used by `JourneyRunner` in
/// tests, the examples, and the CLI's offline mode.
pub struct MockGenerator {
    /// Rounds whose first batch request fails with a `Request` error.
    failing_batches: Mutex<HashSet<u32>>,
    /// When set, every summary request fails.
    failing_summary: bool,
}

impl MockGenerator {
    /// Creates a mock that always succeeds.
    pub fn new() -> Self {
        Self {
            failing_batches: Mutex::new(HashSet::new()),
            failing_summary: false,
        }
    }

    /// Fail the first batch request for `round` (1 = the initial batch), then
    /// succeed on later requests for the same round.
    pub fn with_failing_batch(self, round: u32) -> Self {
        self.failing_batches
            .lock()
            .expect("mock lock poisoned")
            .insert(round);
        self
    }

    /// Fail every summary request.
    pub fn with_failing_summary(mut self) -> Self {
        self.failing_summary = true;
        self
    }

    /// Deterministic batch for a round: ids `round{N}-opt{I}`.
    pub fn batch(topic: &str, round: u32) -> Vec<KnowledgeCard> {
        (1..=CARDS_PER_ROUND)
            .map(|i| KnowledgeCard {
                id: format!("round{}-opt{}", round, i),
                title: format!("{} concept {}.{}", topic, round, i),
                description: format!("A closer look at {} (round {}, option {})", topic, round, i),
                reasoning: format!("Extends the path chosen before round {}", round),
                icon: Some(ICONS[(i - 1) % ICONS.len()].to_string()),
            })
            .collect()
    }

    fn take_failure(&self, round: u32) -> bool {
        self.failing_batches
            .lock()
            .expect("mock lock poisoned")
            .remove(&round)
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardGenerator for MockGenerator {
    async fn initial_batch(&self, topic: &str) -> Result<Vec<KnowledgeCard>, GenerationError> {
        if self.take_failure(1) {
            return Err(GenerationError::Request(
                "scripted failure for round 1".to_string(),
            ));
        }
        Ok(Self::batch(topic, 1))
    }

    async fn next_batch(
        &self,
        topic: &str,
        history: &[Turn],
        target_round: u32,
    ) -> Result<Vec<KnowledgeCard>, GenerationError> {
        debug_assert!(
            history.last().is_some_and(|t| t.selected.is_some()),
            "next_batch requires a completed last turn"
        );
        if self.take_failure(target_round) {
            return Err(GenerationError::Request(format!(
                "scripted failure for round {}",
                target_round
            )));
        }
        Ok(Self::batch(topic, target_round))
    }

    async fn summary(&self, topic: &str, history: &[Turn]) -> Result<Summary, GenerationError> {
        if self.failing_summary {
            return Err(GenerationError::Request(
                "scripted summary failure".to_string(),
            ));
        }
        let path: Vec<String> = history
            .iter()
            .filter_map(|t| t.selected.as_ref().map(|c| c.title.clone()))
            .collect();
        Ok(Summary {
            title: format!("Journey through {}", topic),
            summary: format!("The path taken: {}.", path.join(" -> ")),
            key_takeaways: path,
        })
    }
}
