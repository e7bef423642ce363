//! Text rendering of the session view, the summary, and the settled graph.

use neuropath::{ForceSimulation, KnowledgeGraph, NodeKind, SessionView, Summary};

/// Header line plus the offered cards, numbered for selection.
pub fn round_screen(view: &SessionView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n=== {} | Round {} / {} ({}%) ===\n",
        view.topic,
        view.round,
        view.total_rounds,
        (view.progress * 100.0).round() as u32
    ));
    for (i, card) in view.options.iter().enumerate() {
        let icon = card.icon.as_deref().unwrap_or("*");
        out.push_str(&format!("\n  [{}] {} {}\n", i + 1, icon, card.title));
        out.push_str(&format!("      {}\n", card.description));
        out.push_str(&format!("      why: {}\n", card.reasoning));
    }
    out
}

/// Final summary screen.
pub fn summary_screen(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n=== {} ===\n\n{}\n\nKey takeaways:\n", summary.title, summary.summary));
    for takeaway in &summary.key_takeaways {
        out.push_str(&format!("  - {}\n", takeaway));
    }
    out
}

/// Per-round listing of the graph with settled positions; the chosen path is
/// marked with `[*]`, discarded options with `[ ]`.
pub fn graph_screen(graph: &KnowledgeGraph, sim: &ForceSimulation) -> String {
    let mut out = String::from("\nKnowledge graph:\n");
    for node in &graph.nodes {
        let marker = match node.kind {
            NodeKind::Root => "(R)",
            NodeKind::Selected => "[*]",
            NodeKind::Discarded => "[ ]",
        };
        let pos = sim
            .position(&node.id)
            .map(|p| format!("({:>4.0}, {:>4.0})", p.x, p.y))
            .unwrap_or_else(|| "(   ?,    ?)".to_string());
        out.push_str(&format!(
            "  round {} {} {} {}\n",
            node.round, marker, pos, node.label
        ));
    }
    out
}
