//! Graph topology types: nodes, edges, and the assembled graph.

use serde::{Deserialize, Serialize};

/// Id of the root node (the topic itself).
pub const ROOT_ID: &str = "root";

/// Edge weight along the chosen path.
pub const PATH_WEIGHT: u32 = 2;

/// Edge weight for an offered-but-not-chosen option.
pub const OFFERED_WEIGHT: u32 = 1;

/// What a node represents in the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The topic the session started from.
    Root,
    /// A card the user chose.
    Selected,
    /// A card that was offered but not chosen.
    Discarded,
}

/// One node of the derived graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Round that introduced the node; 0 for the root.
    pub round: u32,
    /// Card description, carried through for tooltips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One edge of the derived graph, from the path tip at the time of the round
/// to an offered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// [`PATH_WEIGHT`] on the chosen path, [`OFFERED_WEIGHT`] otherwise.
    pub weight: u32,
}

impl GraphEdge {
    /// Whether this edge lies on the chosen path.
    pub fn is_path(&self) -> bool {
        self.weight == PATH_WEIGHT
    }
}

/// The derived graph: recomputed in full whenever the history changes, never
/// persisted. Node order is insertion order: root first, then per round in
/// offered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl KnowledgeGraph {
    /// Node lookup by id. Ids are unique by the generator contract; should a
    /// violating batch slip past engine validation, the first match wins.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Selected nodes in round order: the chosen card sequence root-to-latest.
    pub fn selected_path(&self) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Selected)
            .collect()
    }
}
