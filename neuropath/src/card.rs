//! Core journey data: knowledge cards, turns, and the final summary.
//!
//! Cards are produced by a [`CardGenerator`](crate::generator::CardGenerator)
//! and immutable afterwards. A `Turn` pairs the offered batch with the chosen
//! card; the full turn history is what the graph builder consumes.

use serde::{Deserialize, Serialize};

/// One knowledge card offered to the user.
///
/// `id` is unique within its batch and, by the generator contract, across the
/// whole session (generators encode the round number, e.g. `round3-opt1`).
///
/// **Interaction**: Produced by `CardGenerator`; stored in `Turn::options`;
/// becomes one `GraphNode` per card in the derived graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCard {
    /// Unique card id (e.g. "round3-opt1").
    pub id: String,
    /// Short concept title shown on the card.
    pub title: String,
    /// One or two sentences describing the concept.
    pub description: String,
    /// Why the generator offered this card.
    pub reasoning: String,
    /// Optional single-emoji icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One round of the session: the offered batch and (eventually) one chosen card.
///
/// `selected`, when present, is one of `options` by id. At most one turn has
/// `selected == None`, and only as the most recent element of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based round number.
    pub round: u32,
    /// The batch offered this round, in generator order.
    pub options: Vec<KnowledgeCard>,
    /// The chosen card; `None` only while the round is still open.
    pub selected: Option<KnowledgeCard>,
}

impl Turn {
    /// Id of the selected card, when the round is complete.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|c| c.id.as_str())
    }
}

/// Final journey summary, produced once at session completion and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Title given to the whole journey.
    pub title: String,
    /// Cohesive prose summary of the path taken.
    pub summary: String,
    /// 3-5 key takeaways.
    #[serde(rename = "keyTakeaways")]
    pub key_takeaways: Vec<String>,
}

impl Summary {
    /// Fixed fallback used when summary generation fails, so the session still
    /// reaches a terminal, displayable state.
    pub fn fallback() -> Self {
        Self {
            title: "Journey Complete".to_string(),
            summary: "We successfully navigated the knowledge graph.".to_string(),
            key_takeaways: vec!["Exploration complete".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: selected_id returns the chosen card's id, or None for an open turn.
    #[test]
    fn turn_selected_id() {
        let card = KnowledgeCard {
            id: "round1-opt2".into(),
            title: "Espresso".into(),
            description: "Concentrated coffee".into(),
            reasoning: "Core brewing method".into(),
            icon: None,
        };
        let open = Turn {
            round: 1,
            options: vec![card.clone()],
            selected: None,
        };
        assert_eq!(open.selected_id(), None);

        let complete = Turn {
            round: 1,
            options: vec![card.clone()],
            selected: Some(card),
        };
        assert_eq!(complete.selected_id(), Some("round1-opt2"));
    }

    /// **Scenario**: Summary::fallback returns the fixed terminal summary.
    #[test]
    fn summary_fallback_is_fixed() {
        let s = Summary::fallback();
        assert_eq!(s.title, "Journey Complete");
        assert_eq!(s.summary, "We successfully navigated the knowledge graph.");
        assert_eq!(s.key_takeaways, vec!["Exploration complete".to_string()]);
    }

    /// **Scenario**: Summary serializes key_takeaways under the wire name "keyTakeaways".
    #[test]
    fn summary_wire_field_names() {
        let s = Summary::fallback();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"keyTakeaways\""), "wire name missing: {}", json);

        let back: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    /// **Scenario**: A card payload without an icon deserializes with icon = None.
    #[test]
    fn card_without_icon_deserializes() {
        let raw = r#"{"id":"round1-opt1","title":"T","description":"D","reasoning":"R"}"#;
        let card: KnowledgeCard = serde_json::from_str(raw).unwrap();
        assert_eq!(card.icon, None);
    }
}
