//! Knowledge graph derived from the turn history.
//!
//! Pure data: `build_graph` turns the linear choice history into nodes and
//! edges; positions live in the [`layout`](crate::layout) module, never here.

mod builder;
mod node;

pub use builder::build_graph;
pub use node::{
    GraphEdge, GraphNode, KnowledgeGraph, NodeKind, OFFERED_WEIGHT, PATH_WEIGHT, ROOT_ID,
};
