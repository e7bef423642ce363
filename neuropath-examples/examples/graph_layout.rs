//! Build a graph from a fabricated history, settle the force layout, and
//! dump the positioned nodes band by band.
//!
//! Run: `cargo run -p neuropath-examples --example graph_layout`

use neuropath::{build_graph, ForceSimulation, LayoutParams, NodeKind, Viewport};
use neuropath_examples::demo_history;

fn main() {
    let history = demo_history("Quantum Physics", 5);
    let graph = build_graph(&history, "Quantum Physics");
    println!(
        "graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let params = LayoutParams::default();
    let mut sim = ForceSimulation::new(params).with_seed(42);
    sim.set_graph(&graph);
    let ticks = sim.settle(1000);
    println!("settled after {} ticks (alpha {:.4})\n", ticks, sim.alpha());

    let viewport = Viewport::initial(params.width);
    for node in &graph.nodes {
        let pos = sim.position(&node.id).expect("every node has a position");
        let (sx, sy) = viewport.apply(pos.x, pos.y);
        let marker = match node.kind {
            NodeKind::Root => "(R)",
            NodeKind::Selected => "[*]",
            NodeKind::Discarded => "[ ]",
        };
        println!(
            "round {} {} sim ({:>6.1}, {:>6.1}) screen ({:>6.1}, {:>6.1})  {}",
            node.round, marker, pos.x, pos.y, sx, sy, node.label
        );
    }
}
