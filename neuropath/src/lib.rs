//! # NeuroPath
//!
//! A turn-based, AI-guided knowledge exploration engine: the user repeatedly
//! picks one of three generated **knowledge cards**, and the sequence of
//! choices becomes a positioned, interactive graph.
//!
//! ## Design Principles
//!
//! - **One owner for session state**: the [`TurnEngine`] holds the only
//!   mutable `Session` and exposes request/apply operations; everything else
//!   (view, graph, layout) is derived from it.
//! - **Explicit generator messages**: engine operations return a
//!   [`GeneratorRequest`] with a generation token instead of calling the
//!   model themselves, so a response arriving after a reset is detectably
//!   stale and discarded.
//! - **Topology and physics stay apart**: the graph builder emits pure
//!   nodes/edges; the force simulation keeps positions in its own keyed
//!   state and reconciles them when the graph grows.
//!
//! ## Main Modules
//!
//! - [`engine`]: `TurnEngine`, `JourneyRunner`, view model and session events.
//! - [`generator`]: `CardGenerator` trait, `MockGenerator`, prompts, payload
//!   parsing, and an OpenAI-compatible client behind the `openai` feature.
//! - [`graph`]: `build_graph` and the node/edge types derived from history.
//! - [`layout`]: `ForceSimulation` (link, repulsion, banding, centering,
//!   collision forces; drag pinning) and the `Viewport` zoom/pan transform.
//!
//! ## Features
//!
//! - `openai`: OpenAI-compatible card generator via `async-openai`.
//! - `tracing`: structured logging for session transitions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use neuropath::{build_graph, ForceSimulation, JourneyRunner, LayoutParams, MockGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut runner = JourneyRunner::new(Arc::new(MockGenerator::new()));
//! runner.start("History of Coffee").await?;
//!
//! while runner.view().phase == neuropath::Phase::Playing {
//!     let first = runner.view().options[0].id.clone();
//!     runner.choose(&first).await?;
//! }
//!
//! let graph = build_graph(runner.engine().session().history(), "History of Coffee");
//! let mut layout = ForceSimulation::new(LayoutParams::default());
//! layout.set_graph(&graph);
//! layout.settle(600);
//! # Ok(())
//! # }
//! ```

pub mod card;
pub mod engine;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod session;

pub use card::{KnowledgeCard, Summary, Turn};
pub use engine::{
    ApplyOutcome, EngineError, GeneratorRequest, JourneyError, JourneyRunner, RequestToken,
    SessionEvent, SessionView, TurnEngine,
};
pub use generator::{CardGenerator, GenerationError, MockGenerator};
#[cfg(feature = "openai")]
pub use generator::OpenAiGenerator;
pub use graph::{
    build_graph, GraphEdge, GraphNode, KnowledgeGraph, NodeKind, OFFERED_WEIGHT, PATH_WEIGHT,
    ROOT_ID,
};
pub use layout::{ForceSimulation, LayoutParams, LayoutPosition, Viewport};
pub use session::{Phase, Session, CARDS_PER_ROUND, TOTAL_ROUNDS};
