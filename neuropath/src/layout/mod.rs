//! Force-directed layout for the knowledge graph.
//!
//! An iterative physical simulation assigns 2D positions: link springs pull
//! connected nodes toward a rest distance, pairwise repulsion spreads
//! unrelated branches, rounds settle into bands along the y axis, and a
//! collision pass keeps node centers apart. Zoom/pan is a separate
//! [`Viewport`] transform over the rendered scene and never touches
//! simulation coordinates.

mod params;
mod simulation;
mod viewport;

pub use params::LayoutParams;
pub use simulation::{ForceSimulation, LayoutPosition};
pub use viewport::{Viewport, MAX_SCALE, MIN_SCALE};
