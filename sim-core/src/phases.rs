//! Per-tick simulation phases for the growing graph.
//!
//! The update loop runs, in this fixed order:
//! 1. [`growth_phase`] — every segment's desired length grows, and with
//!    some probability a new branch sprouts from a random node.
//! 2. [`sizing_phase`] — node radii are recomputed from the desired
//!    lengths of their incident segments.
//! 3. [`relaxation_phase`] — a fixed number of sweeps move nodes so that
//!    springs approach their desired lengths and circles stop overlapping.
//!
//! Sizing must see this tick's lengths, and relaxation must see this
//! tick's radii. [`step`] runs the three phases in that order.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::trace;

use crate::{
    config::GrowthConfig, graph::Graph, length_buffer::LengthBuffer, types::NodeId, vector,
};

/// Elongates every segment and possibly adds one branch.
///
/// 1. Adds `cfg.growth_rate` to the desired length of every segment.
/// 2. Draws a uniform number in `[0, 1)`. If it is below
///    `cfg.growth_chance` and the graph is below `cfg.max_nodes`, picks a
///    parent uniformly among the current nodes and a direction uniformly
///    in `[0, 2π)`, then appends a child `cfg.initial_branch_length` away
///    from the parent, joined to it by a new segment.
///
/// A successful draw on a full graph is a silent no-op.
///
/// ### Parameters
/// - `graph` - The graph to grow.
/// - `rng` - Source of randomness for the branch draw, parent and angle.
/// - `cfg` - Growth parameters.
///
/// ### Returns
/// The id of the new child node if a branch was added.
pub fn growth_phase(graph: &mut Graph, rng: &mut impl Rng, cfg: &GrowthConfig) -> Option<NodeId> {
    for s in &mut graph.segments {
        s.desired_length += cfg.growth_rate;
    }

    if rng.random::<f32>() >= cfg.growth_chance
        || graph.nodes.len() >= cfg.max_nodes
        || graph.is_full()
        || graph.nodes.is_empty()
    {
        return None;
    }

    let parent = rng.random_range(0..graph.nodes.len());
    let angle = rng.random_range(0.0..TAU);
    let pos = graph.nodes[parent].pos + vector::from_angle(angle, cfg.initial_branch_length);

    let child = graph.add_child(parent, pos, cfg.initial_radius)?;
    trace!(parent, child, angle, "branched");
    Some(child)
}

/// Recomputes every node's radius from its incident segments.
///
/// For each node, `radius = max(cfg.min_radius, avg * cfg.node_size_multiplier)`
/// where `avg` is the mean desired length of the segments touching it.
/// A node with no incident segment keeps its current radius.
///
/// ### Parameters
/// - `graph` - The graph whose radii are updated.
/// - `cfg` - Sizing parameters.
/// - `buf` - Scratch buffer, resized and refilled on every call.
pub fn sizing_phase(graph: &mut Graph, cfg: &GrowthConfig, buf: &mut LengthBuffer) {
    buf.accumulate(graph.nodes.len(), &graph.segments);

    for (id, node) in graph.nodes.iter_mut().enumerate() {
        if let Some(avg) = buf.average(id) {
            node.radius = (avg * cfg.node_size_multiplier).max(cfg.min_radius);
        }
    }
}

/// Pulls or pushes the endpoints of every segment toward its desired length.
///
/// For each segment, in order, with `delta = pos_b - pos_a`:
/// `correction = normalize(delta) * (desired - |delta|) * 0.5 * attraction_force`,
/// then `pos_a -= correction` and `pos_b += correction`. Corrections are
/// applied immediately, so later segments see the moved positions.
///
/// Coincident endpoints have no direction and are skipped for this sweep.
pub fn spring_sweep(graph: &mut Graph, attraction_force: f32) {
    for i in 0..graph.segments.len() {
        let (a, b, desired) = {
            let s = &graph.segments[i];
            (s.a, s.b, s.desired_length)
        };
        let (na, nb) = graph.pair_mut(a, b);
        let delta = nb.pos - na.pos;
        let diff = desired - delta.length();
        if let Some(correction) = vector::scaled_along(delta, diff * 0.5 * attraction_force) {
            na.pos -= correction;
            nb.pos += correction;
        }
    }
}

/// Pushes apart every pair of overlapping circles.
///
/// For each unordered pair `(j, k)` with `j < k`, in index order: if the
/// distance between centers is below `r_j + r_k`, both nodes move apart
/// along the line joining them by half of `overlap * repulsion_force`.
///
/// Coincident centers have no direction and are skipped for this sweep.
pub fn repulsion_sweep(graph: &mut Graph, repulsion_force: f32) {
    let n = graph.nodes.len();
    for j in 0..n {
        for k in (j + 1)..n {
            let (n1, n2) = graph.pair_mut(j, k);
            let delta = n2.pos - n1.pos;
            let dist = delta.length();
            let min_dist = n1.radius + n2.radius;
            if dist >= min_dist {
                continue;
            }
            let diff = min_dist - dist;
            if let Some(correction) = vector::scaled_along(delta, diff * 0.5 * repulsion_force) {
                n1.pos -= correction;
                n2.pos += correction;
            }
        }
    }
}

/// Runs `cfg.physics_iterations` sweeps of springs followed by repulsion.
///
/// There is no convergence test: the solver runs every frame, and the
/// residual error of one frame is worked off in the next.
pub fn relaxation_phase(graph: &mut Graph, cfg: &GrowthConfig) {
    for _ in 0..cfg.physics_iterations {
        spring_sweep(graph, cfg.attraction_force);
        repulsion_sweep(graph, cfg.repulsion_force);
    }
}

/// Advances the graph by one tick: growth, sizing, then relaxation.
///
/// ### Returns
/// The id of the node added by this tick's branch, if any.
pub fn step(
    graph: &mut Graph,
    rng: &mut impl Rng,
    cfg: &GrowthConfig,
    buf: &mut LengthBuffer,
) -> Option<NodeId> {
    let new_node = growth_phase(graph, rng, cfg);
    sizing_phase(graph, cfg, buf);
    relaxation_phase(graph, cfg);
    new_node
}
