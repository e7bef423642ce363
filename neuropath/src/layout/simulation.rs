//! Iterative force simulation over the graph's nodes.
//!
//! One `tick()` per rendering frame: relax alpha, apply link springs,
//! pairwise repulsion, band and centering pulls, integrate velocities, then
//! resolve collisions positionally so no two centers stay closer than the
//! minimum separation. Dragging pins a node to the pointer and re-heats the
//! simulation; `set_graph` reconciles positions so a growing graph settles
//! around what the user already sees instead of jumping.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::LayoutParams;
use crate::graph::KnowledgeGraph;

/// Alpha below which the simulation is at rest.
const ALPHA_MIN: f32 = 0.001;
/// Per-tick relaxation rate toward alpha_target; reaches rest in ~300 ticks.
const ALPHA_DECAY: f32 = 0.0228;
/// Fraction of velocity lost per tick.
const VELOCITY_DECAY: f32 = 0.4;
/// Alpha target while a node is being dragged.
const DRAG_ALPHA_TARGET: f32 = 0.3;
/// Radius of the random offset used to seed a new node near its parent.
const SEED_JITTER: f32 = 10.0;
/// Distance floor guarding the force math against coincident nodes.
const EPSILON: f32 = 1e-3;

/// Transient per-node layout state exposed to renderers.
///
/// Kept separate from graph topology: positions are reset or reconciled when
/// the node set changes and are never part of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPosition {
    pub x: f32,
    pub y: f32,
    /// Whether the node is currently pinned (being dragged).
    pub pinned: bool,
}

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    /// Pin position while dragged; `None` when force-driven.
    fixed: Option<(f32, f32)>,
    round: u32,
}

/// Force-directed simulation: assigns and continuously refines positions.
///
/// **Interaction**: Fed a [`KnowledgeGraph`] via `set_graph`; ticked by the
/// rendering loop; positions read back after each tick for redraw.
pub struct ForceSimulation {
    params: LayoutParams,
    ids: Vec<String>,
    index: HashMap<String, usize>,
    bodies: Vec<Body>,
    /// Edges as (source, target) body indices.
    links: Vec<(usize, usize)>,
    /// Link count per body, for spring strength and bias.
    degree: Vec<u32>,
    alpha: f32,
    alpha_target: f32,
    rng: StdRng,
}

impl ForceSimulation {
    /// Creates an empty simulation.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            ids: Vec::new(),
            index: HashMap::new(),
            bodies: Vec::new(),
            links: Vec::new(),
            degree: Vec::new(),
            alpha: 1.0,
            alpha_target: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the internal randomness, for reproducible layouts in tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the simulated graph, carrying over positions of surviving
    /// nodes and seeding new nodes near their parent (the source of their
    /// first incoming edge), then re-heats so the layout re-settles.
    pub fn set_graph(&mut self, graph: &KnowledgeGraph) {
        let mut parent: HashMap<&str, &str> = HashMap::new();
        for edge in &graph.edges {
            parent
                .entry(edge.target.as_str())
                .or_insert(edge.source.as_str());
        }

        let carried: HashMap<String, Body> =
            self.ids.drain(..).zip(self.bodies.drain(..)).collect();
        let mut ids = Vec::with_capacity(graph.nodes.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(graph.nodes.len());
        let mut bodies: Vec<Body> = Vec::with_capacity(graph.nodes.len());

        for node in &graph.nodes {
            let body = if let Some(prev) = carried.get(&node.id) {
                Body {
                    round: node.round,
                    ..*prev
                }
            } else {
                // Parents precede children in insertion order, so the anchor
                // is already placed by the time we reach the child.
                let anchor = parent
                    .get(node.id.as_str())
                    .and_then(|pid| index.get(*pid))
                    .map(|&i| (bodies[i].x, bodies[i].y))
                    .unwrap_or((
                        self.params.width / 2.0,
                        node.round as f32 * self.params.band_height,
                    ));
                Body {
                    x: anchor.0 + self.rng.gen_range(-SEED_JITTER..=SEED_JITTER),
                    y: anchor.1 + self.rng.gen_range(-SEED_JITTER..=SEED_JITTER),
                    vx: 0.0,
                    vy: 0.0,
                    fixed: None,
                    round: node.round,
                }
            };
            index.insert(node.id.clone(), ids.len());
            ids.push(node.id.clone());
            bodies.push(body);
        }

        self.links = graph
            .edges
            .iter()
            .filter_map(|e| Some((*index.get(&e.source)?, *index.get(&e.target)?)))
            .collect();
        self.degree = vec![0; bodies.len()];
        for &(s, t) in &self.links {
            self.degree[s] += 1;
            self.degree[t] += 1;
        }

        self.ids = ids;
        self.index = index;
        self.bodies = bodies;
        self.alpha = 1.0;
    }

    /// Advances the simulation one step. Returns `false` once at rest (or
    /// when there is nothing to simulate); a re-heat makes it active again.
    pub fn tick(&mut self) -> bool {
        if self.bodies.is_empty() {
            return false;
        }
        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
        if self.alpha < ALPHA_MIN {
            return false;
        }

        self.apply_link_force();
        self.apply_repulsion();
        self.apply_banding();
        self.apply_centering();
        self.integrate();
        self.resolve_collisions();
        true
    }

    /// Ticks until the simulation is at rest, up to `max_ticks`. Returns the
    /// number of ticks consumed.
    pub fn settle(&mut self, max_ticks: usize) -> usize {
        for used in 0..max_ticks {
            if !self.tick() {
                return used;
            }
        }
        max_ticks
    }

    /// Whether the simulation has reached rest.
    pub fn is_settled(&self) -> bool {
        self.alpha < ALPHA_MIN
    }

    /// Current simulation energy.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Position of one node.
    pub fn position(&self, id: &str) -> Option<LayoutPosition> {
        let &i = self.index.get(id)?;
        let body = &self.bodies[i];
        Some(LayoutPosition {
            x: body.x,
            y: body.y,
            pinned: body.fixed.is_some(),
        })
    }

    /// All positions, in graph insertion order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, LayoutPosition)> + '_ {
        self.ids.iter().zip(&self.bodies).map(|(id, body)| {
            (
                id.as_str(),
                LayoutPosition {
                    x: body.x,
                    y: body.y,
                    pinned: body.fixed.is_some(),
                },
            )
        })
    }

    /// Pins `id` at its current position and re-heats the simulation.
    /// Returns `false` for an unknown node.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let body = &mut self.bodies[i];
        body.fixed = Some((body.x, body.y));
        self.alpha_target = DRAG_ALPHA_TARGET;
        true
    }

    /// Moves a dragged node to the pointer position. The node follows
    /// immediately and stays pinned there on subsequent ticks.
    pub fn drag_to(&mut self, id: &str, x: f32, y: f32) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let body = &mut self.bodies[i];
        if body.fixed.is_none() {
            return false;
        }
        body.fixed = Some((x, y));
        body.x = x;
        body.y = y;
        true
    }

    /// Releases a dragged node back to the simulation.
    pub fn end_drag(&mut self, id: &str) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        self.bodies[i].fixed = None;
        self.alpha_target = 0.0;
        true
    }

    /// Spring per link: pulls endpoints toward the rest length, harder the
    /// further apart they are. Strength and bias follow link degree so leaf
    /// nodes move more than hubs.
    fn apply_link_force(&mut self) {
        for &(s, t) in &self.links {
            let source = self.bodies[s];
            let target = self.bodies[t];
            let mut dx = (target.x + target.vx) - (source.x + source.vx);
            let mut dy = (target.y + target.vy) - (source.y + source.vy);
            let len = (dx * dx + dy * dy).sqrt().max(EPSILON);
            let strength = 1.0 / self.degree[s].min(self.degree[t]).max(1) as f32;
            let k = (len - self.params.link_distance) / len * self.alpha * strength;
            dx *= k;
            dy *= k;

            let bias = self.degree[s] as f32 / (self.degree[s] + self.degree[t]) as f32;
            self.bodies[t].vx -= dx * bias;
            self.bodies[t].vy -= dy * bias;
            self.bodies[s].vx += dx * (1.0 - bias);
            self.bodies[s].vy += dy * (1.0 - bias);
        }
    }

    /// Pairwise many-body repulsion, inverse-square with distance.
    fn apply_repulsion(&mut self) {
        let strength = self.params.charge_strength;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let dx = self.bodies[j].x - self.bodies[i].x;
                let dy = self.bodies[j].y - self.bodies[i].y;
                let d2 = (dx * dx + dy * dy).max(EPSILON);
                let w = strength * self.alpha / d2;
                self.bodies[i].vx += dx * w;
                self.bodies[i].vy += dy * w;
                self.bodies[j].vx -= dx * w;
                self.bodies[j].vy -= dy * w;
            }
        }
    }

    /// Pulls each node toward its round band (`round * band_height`).
    fn apply_banding(&mut self) {
        let strength = self.params.band_strength * self.alpha;
        let band_height = self.params.band_height;
        for body in &mut self.bodies {
            let target_y = body.round as f32 * band_height;
            body.vy += (target_y - body.y) * strength;
        }
    }

    /// Weakly pulls every node toward the horizontal midline.
    fn apply_centering(&mut self) {
        let strength = self.params.center_strength * self.alpha;
        let mid_x = self.params.width / 2.0;
        for body in &mut self.bodies {
            body.vx += (mid_x - body.x) * strength;
        }
    }

    /// Integrates velocities into positions. Pinned nodes are forced to their
    /// pin and excluded from force-driven movement.
    fn integrate(&mut self) {
        for body in &mut self.bodies {
            if let Some((fx, fy)) = body.fixed {
                body.x = fx;
                body.y = fy;
                body.vx = 0.0;
                body.vy = 0.0;
            } else {
                body.vx *= 1.0 - VELOCITY_DECAY;
                body.vy *= 1.0 - VELOCITY_DECAY;
                body.x += body.vx;
                body.y += body.vy;
            }
        }
    }

    /// Separates any pair closer than the minimum center distance. Pinned
    /// nodes stay put; their partner absorbs the full correction.
    fn resolve_collisions(&mut self) {
        let min_dist = self.params.min_separation();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let bi = self.bodies[i];
                let bj = self.bodies[j];
                let mut dx = bj.x - bi.x;
                let mut dy = bj.y - bi.y;
                let mut d = (dx * dx + dy * dy).sqrt();
                if d >= min_dist {
                    continue;
                }
                if d < EPSILON {
                    // Coincident centers have no separation axis; jiggle one.
                    dx = self.rng.gen_range(-1.0..=1.0) * EPSILON;
                    dy = self.rng.gen_range(-1.0..=1.0) * EPSILON;
                    d = (dx * dx + dy * dy).sqrt().max(EPSILON / 2.0);
                }
                let push = (min_dist - d) / d;
                let (cx, cy) = (dx * push, dy * push);
                match (bi.fixed.is_some(), bj.fixed.is_some()) {
                    (true, true) => {}
                    (true, false) => {
                        self.bodies[j].x += cx;
                        self.bodies[j].y += cy;
                    }
                    (false, true) => {
                        self.bodies[i].x -= cx;
                        self.bodies[i].y -= cy;
                    }
                    (false, false) => {
                        self.bodies[i].x -= cx * 0.5;
                        self.bodies[i].y -= cy * 0.5;
                        self.bodies[j].x += cx * 0.5;
                        self.bodies[j].y += cy * 0.5;
                    }
                }
            }
        }
    }
}
