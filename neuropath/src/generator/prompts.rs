//! Prompt builders for LLM-backed card generators.
//!
//! Prompts condition the model on the topic, the ordered path of chosen
//! cards, the immediately preceding selection, and the target round number;
//! the final round asks for terminal mastery concepts instead of further
//! branches. Responses are requested as the JSON shapes parsed by
//! [`payload`](super::payload).

use crate::card::Turn;
use crate::session::TOTAL_ROUNDS;

/// System instruction for the opening batch.
pub const ARCHITECT_SYSTEM_PROMPT: &str = "You are a specialized Knowledge Graph Architect. \
Your goal is to guide a user through a topic by offering branching paths of learning.";

/// System instruction for every subsequent batch.
pub const GUIDE_SYSTEM_PROMPT: &str = "You are a Knowledge Guide. Maintain continuity but \
introduce novelty. If it's the final round (8), these cards should represent conclusions \
or final mastery concepts.";

/// JSON shape appended to card prompts (JSON mode carries no schema).
const CARDS_FORMAT: &str = r#"Respond with JSON of the form:
{"cards": [{"id": "...", "title": "...", "description": "...", "reasoning": "...", "icon": "one emoji"}]}"#;

/// JSON shape appended to the summary prompt.
const SUMMARY_FORMAT: &str = r#"Respond with JSON of the form:
{"title": "...", "summary": "...", "keyTakeaways": ["...", "..."]}"#;

/// Prompt for the opening batch: bare topic, no path conditioning.
pub fn initial_prompt(topic: &str) -> String {
    format!(
        "The user wants to explore the topic: \"{topic}\".\n\
         This is the start of an {TOTAL_ROUNDS}-round knowledge exploration game.\n\
         Generate 3 distinct starting concepts or branches related to \"{topic}\".\n\
         Ensure they are diverse and interesting.\n\
         The 'id' should be unique (e.g. 'round1-opt1').\n\n\
         {CARDS_FORMAT}"
    )
}

/// Prompt for the batch of `target_round`, conditioned on the path so far.
///
/// Callers guarantee a non-empty history whose last turn has a selection.
pub fn next_prompt(topic: &str, history: &[Turn], target_round: u32) -> String {
    let selected = history.last().and_then(|t| t.selected.as_ref());
    let (title, description) = selected
        .map(|c| (c.title.as_str(), c.description.as_str()))
        .unwrap_or_default();

    let final_round_note = if target_round >= TOTAL_ROUNDS {
        "\nThis is the final round: the cards should represent conclusions or mastery concepts.\n"
    } else {
        ""
    };

    format!(
        "Context:\n\
         - Main Topic: \"{topic}\"\n\
         - Current Path: {path}\n\
         - Just Selected: \"{title}\" ({description})\n\
         - Current Round: {target_round} of {TOTAL_ROUNDS}.\n\
         {final_round_note}\n\
         Task:\n\
         Generate 3 new sub-concepts, deeper dives, or related tangential topics based \
         specifically on the choice of \"{title}\".\n\
         These should represent the next logical step in learning or exploring this branch.\n\
         The 'id' should be 'round{target_round}-opt1', etc.\n\n\
         {CARDS_FORMAT}",
        path = path_summary(history),
    )
}

/// Prompt for the terminal summary over the full history.
pub fn summary_prompt(topic: &str, history: &[Turn]) -> String {
    let path_details: Vec<String> = history
        .iter()
        .filter_map(|turn| {
            turn.selected.as_ref().map(|c| {
                format!(
                    "Round {}: Chosen \"{}\" (Context: {})",
                    turn.round, c.title, c.description
                )
            })
        })
        .collect();

    format!(
        "Analyze this learning path:\n\
         Topic: {topic}\n\
         Path:\n\
         {path}\n\n\
         Create a cohesive summary of this knowledge journey. Give the journey a cool \
         title. List 3-5 key takeaways.\n\n\
         {SUMMARY_FORMAT}",
        path = path_details.join("\n"),
    )
}

/// The chosen titles joined as a path, e.g. `Beans -> Roasting -> Espresso`.
fn path_summary(history: &[Turn]) -> String {
    history
        .iter()
        .filter_map(|t| t.selected.as_ref().map(|c| c.title.as_str()))
        .collect::<Vec<_>>()
        .join(" -> ")
}
