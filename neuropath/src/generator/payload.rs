//! Wire payload schema for generator responses.
//!
//! Generators answer with structured JSON: `{"cards": [...]}` for a batch and
//! `{"title", "summary", "keyTakeaways"}` for the final summary. Parsing is
//! defensive: schema mismatches and contract violations are reported as
//! `GenerationError::Malformed`, never applied to the session.

use std::collections::HashSet;

use serde::Deserialize;

use super::GenerationError;
use crate::card::{KnowledgeCard, Summary};

#[derive(Debug, Deserialize)]
struct CardsPayload {
    cards: Vec<KnowledgeCard>,
}

/// Parses a `{"cards": [...]}` payload and validates the batch contract.
pub fn parse_cards(raw: &str) -> Result<Vec<KnowledgeCard>, GenerationError> {
    let payload: CardsPayload = serde_json::from_str(raw)
        .map_err(|e| GenerationError::Malformed(format!("cards payload: {}", e)))?;
    validate_batch(payload.cards)
}

/// Validates a card batch: non-empty, no blank ids, no duplicate ids.
///
/// Also applied by the turn engine to batches from any `CardGenerator`, so a
/// custom implementation cannot smuggle colliding ids into the graph.
pub(crate) fn validate_batch(
    batch: Vec<KnowledgeCard>,
) -> Result<Vec<KnowledgeCard>, GenerationError> {
    if batch.is_empty() {
        return Err(GenerationError::Malformed("empty card batch".to_string()));
    }
    let mut seen = HashSet::new();
    for card in &batch {
        if card.id.trim().is_empty() {
            return Err(GenerationError::Malformed("card with blank id".to_string()));
        }
        if !seen.insert(card.id.as_str()) {
            return Err(GenerationError::Malformed(format!(
                "duplicate card id {:?}",
                card.id
            )));
        }
    }
    Ok(batch)
}

/// Parses a summary payload.
pub fn parse_summary(raw: &str) -> Result<Summary, GenerationError> {
    let summary: Summary = serde_json::from_str(raw)
        .map_err(|e| GenerationError::Malformed(format!("summary payload: {}", e)))?;
    if summary.title.trim().is_empty() || summary.summary.trim().is_empty() {
        return Err(GenerationError::Malformed(
            "summary with blank title or body".to_string(),
        ));
    }
    Ok(summary)
}
