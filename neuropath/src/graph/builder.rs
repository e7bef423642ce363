//! Builds the knowledge graph from the turn history.
//!
//! Pure function of (history, root topic): one root node, one node per
//! offered card, one edge from the path tip of the round to each offered
//! card. Rebuilt in full on every history change; the history only grows by
//! appending, so there is no incremental update to maintain.

use super::{
    GraphEdge, GraphNode, KnowledgeGraph, NodeKind, OFFERED_WEIGHT, PATH_WEIGHT, ROOT_ID,
};
use crate::card::Turn;

/// Fold accumulator: the graph built so far plus the current path tip.
struct PathState {
    graph: KnowledgeGraph,
    cursor: String,
}

/// Builds the graph for `history`, rooted at `root_topic`.
///
/// Each turn contributes its full offered batch as nodes (kind by selection)
/// and an edge from the path tip to every option (weight 2 on the chosen
/// path). The tip advances only when the turn has a selection, so an open
/// trailing turn contributes nodes and edges without moving the path forward.
pub fn build_graph(history: &[Turn], root_topic: &str) -> KnowledgeGraph {
    let root = GraphNode {
        id: ROOT_ID.to_string(),
        label: root_topic.to_string(),
        kind: NodeKind::Root,
        round: 0,
        description: None,
    };
    let start = PathState {
        graph: KnowledgeGraph {
            nodes: vec![root],
            edges: Vec::new(),
        },
        cursor: ROOT_ID.to_string(),
    };

    let state = history.iter().fold(start, |mut state, turn| {
        for option in &turn.options {
            let selected = turn.selected_id() == Some(option.id.as_str());
            state.graph.nodes.push(GraphNode {
                id: option.id.clone(),
                label: option.title.clone(),
                kind: if selected {
                    NodeKind::Selected
                } else {
                    NodeKind::Discarded
                },
                round: turn.round,
                description: Some(option.description.clone()),
            });
            state.graph.edges.push(GraphEdge {
                source: state.cursor.clone(),
                target: option.id.clone(),
                weight: if selected { PATH_WEIGHT } else { OFFERED_WEIGHT },
            });
        }
        if let Some(id) = turn.selected_id() {
            state.cursor = id.to_string();
        }
        state
    });

    state.graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::KnowledgeCard;
    use crate::generator::MockGenerator;

    fn completed_turn(round: u32, pick: usize) -> Turn {
        let options = MockGenerator::batch("Coffee", round);
        let selected = Some(options[pick].clone());
        Turn {
            round,
            options,
            selected,
        }
    }

    fn history(rounds: u32) -> Vec<Turn> {
        (1..=rounds).map(|r| completed_turn(r, 0)).collect()
    }

    /// **Scenario**: An empty history yields only the root node and no edges.
    #[test]
    fn empty_history_is_root_only() {
        let graph = build_graph(&[], "Coffee");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        let root = &graph.nodes[0];
        assert_eq!(root.id, ROOT_ID);
        assert_eq!(root.label, "Coffee");
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(root.round, 0);
    }

    /// **Scenario**: Topic "Coffee", batch [A,B,C], B selected: 4 nodes,
    /// root->B weighted 2, root->A and root->C weighted 1.
    #[test]
    fn single_round_selection() {
        let turn = completed_turn(1, 1);
        let graph = build_graph(&[turn.clone()], "Coffee");

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let selected_id = turn.selected_id().unwrap();
        for edge in &graph.edges {
            assert_eq!(edge.source, ROOT_ID);
            let expected = if edge.target == selected_id {
                PATH_WEIGHT
            } else {
                OFFERED_WEIGHT
            };
            assert_eq!(edge.weight, expected, "edge to {}", edge.target);
        }
        assert_eq!(graph.node(selected_id).unwrap().kind, NodeKind::Selected);
        assert_eq!(
            graph.node("round1-opt1").unwrap().kind,
            NodeKind::Discarded
        );
    }

    /// **Scenario**: Node and edge counts equal 1 + total offered options and
    /// total offered options respectively, for every history length.
    #[test]
    fn counts_match_offered_options() {
        for k in 0..=8u32 {
            let h = history(k);
            let offered: usize = h.iter().map(|t| t.options.len()).sum();
            let graph = build_graph(&h, "Coffee");
            assert_eq!(graph.node_count(), 1 + offered, "k = {}", k);
            assert_eq!(graph.edge_count(), offered, "k = {}", k);
        }
    }

    /// **Scenario**: Exactly one node per completed round has kind Selected,
    /// and the selected path reconstructs the chosen card sequence in order.
    #[test]
    fn selected_path_reconstructs_choices() {
        let h: Vec<Turn> = vec![
            completed_turn(1, 2),
            completed_turn(2, 0),
            completed_turn(3, 1),
        ];
        let graph = build_graph(&h, "Coffee");

        let path = graph.selected_path();
        assert_eq!(path.len(), 3);
        for (node, turn) in path.iter().zip(&h) {
            assert_eq!(Some(node.id.as_str()), turn.selected_id());
            assert_eq!(node.round, turn.round);
        }
    }

    /// **Scenario**: Each round's edges originate from the previous round's
    /// selection (the path tip), not from the root.
    #[test]
    fn edges_chain_from_path_tip() {
        let h = vec![completed_turn(1, 1), completed_turn(2, 0)];
        let graph = build_graph(&h, "Coffee");

        let round2_edges: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| e.target.starts_with("round2"))
            .collect();
        assert_eq!(round2_edges.len(), 3);
        for edge in round2_edges {
            assert_eq!(edge.source, "round1-opt2");
        }
    }

    /// **Scenario**: An open trailing turn contributes nodes and edges but
    /// does not advance the path tip.
    #[test]
    fn open_trailing_turn_keeps_cursor() {
        let mut h = vec![completed_turn(1, 0)];
        h.push(Turn {
            round: 2,
            options: MockGenerator::batch("Coffee", 2),
            selected: None,
        });
        let graph = build_graph(&h, "Coffee");

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.selected_path().len(), 1);
        // Round-2 options all hang off the round-1 selection with offered weight.
        for edge in graph.edges.iter().filter(|e| e.target.starts_with("round2")) {
            assert_eq!(edge.source, "round1-opt1");
            assert_eq!(edge.weight, OFFERED_WEIGHT);
        }
    }

    /// **Scenario**: Round fields equal the 1-based turn index; the root is round 0.
    #[test]
    fn round_numbering() {
        let graph = build_graph(&history(4), "Coffee");
        assert_eq!(graph.node(ROOT_ID).unwrap().round, 0);
        for node in graph.nodes.iter().skip(1) {
            let expected: u32 = node.id["round".len()..]
                .split('-')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert_eq!(node.round, expected, "node {}", node.id);
        }
    }

    /// **Scenario**: Rebuilding from the same history yields an identical graph.
    #[test]
    fn build_is_idempotent() {
        let h = history(5);
        assert_eq!(build_graph(&h, "Coffee"), build_graph(&h, "Coffee"));
    }

    /// **Scenario**: Card descriptions are carried onto nodes; the root has none.
    #[test]
    fn descriptions_carried_through() {
        let card = KnowledgeCard {
            id: "round1-opt1".into(),
            title: "Beans".into(),
            description: "Where it all starts".into(),
            reasoning: "r".into(),
            icon: None,
        };
        let h = vec![Turn {
            round: 1,
            options: vec![card.clone()],
            selected: Some(card),
        }];
        let graph = build_graph(&h, "Coffee");
        assert_eq!(graph.node(ROOT_ID).unwrap().description, None);
        assert_eq!(
            graph.node("round1-opt1").unwrap().description.as_deref(),
            Some("Where it all starts")
        );
    }
}
