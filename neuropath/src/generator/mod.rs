//! Card generator abstraction: the external content collaborator.
//!
//! The turn engine never calls a model directly; it consumes batches and
//! summaries through the [`CardGenerator`] trait. This module defines the
//! trait and its error type, the prompt builders, the structured-JSON payload
//! schema with defensive validation, and a scripted mock. A real
//! OpenAI-compatible client is available behind the `openai` feature.

mod mock;
mod payload;
pub mod prompts;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockGenerator;
pub use payload::{parse_cards, parse_summary};
pub(crate) use payload::validate_batch;

#[cfg(feature = "openai")]
pub use openai::OpenAiGenerator;

use async_trait::async_trait;
use thiserror::Error;

use crate::card::{KnowledgeCard, Summary, Turn};

/// Generation failure: the call itself failed, or it answered with data that
/// does not satisfy the card/summary contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Transport or API failure (network, auth, rate limit).
    #[error("generation request failed: {0}")]
    Request(String),
    /// Response parsed but violates the payload contract (schema mismatch,
    /// empty batch, duplicate or blank card ids).
    #[error("malformed generation payload: {0}")]
    Malformed(String),
}

/// Asynchronous source of knowledge cards and the final summary.
///
/// Batches hold [`CARDS_PER_ROUND`](crate::session::CARDS_PER_ROUND) cards
/// with ids unique within the batch and, by convention, across the session
/// (encode the round number). `next_batch` must only be called with a
/// non-empty history whose last turn has a selection. All calls are
/// single-attempt; retry policy belongs to the caller.
///
/// **Interaction**: Driven by `JourneyRunner`, which resolves the engine's
/// `GeneratorRequest`s against an implementation of this trait.
#[async_trait]
pub trait CardGenerator: Send + Sync {
    /// First batch for a fresh session, conditioned on the bare topic.
    async fn initial_batch(&self, topic: &str) -> Result<Vec<KnowledgeCard>, GenerationError>;

    /// Batch for `target_round`, conditioned on the topic, the chosen path so
    /// far, and the immediately preceding selection. The generator is told
    /// when `target_round` is the final round so its output represents
    /// terminal concepts rather than further branches.
    async fn next_batch(
        &self,
        topic: &str,
        history: &[Turn],
        target_round: u32,
    ) -> Result<Vec<KnowledgeCard>, GenerationError>;

    /// Terminal summary over the full history.
    async fn summary(&self, topic: &str, history: &[Turn]) -> Result<Summary, GenerationError>;
}
