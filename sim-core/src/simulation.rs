//! The per-frame orchestrator and the snapshots it hands to renderers.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::GrowthConfig,
    error::SimError,
    graph::Graph,
    length_buffer::LengthBuffer,
    phases,
    types::NodeId,
};

/// A node as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// A segment as seen by a renderer: the positions of its two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SegmentView {
    pub ax: f32,
    pub ay: f32,
    pub bx: f32,
    pub by: f32,
}

/// Read-only snapshot of the graph after a tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    pub nodes: Vec<NodeView>,
    pub segments: Vec<SegmentView>,
}

impl Frame {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|n| NodeView {
                x: n.pos.x,
                y: n.pos.y,
                radius: n.radius,
            })
            .collect();
        let segments = graph
            .segments
            .iter()
            .map(|s| {
                let a = graph.nodes[s.a].pos;
                let b = graph.nodes[s.b].pos;
                SegmentView {
                    ax: a.x,
                    ay: a.y,
                    bx: b.x,
                    by: b.y,
                }
            })
            .collect();
        Self { nodes, segments }
    }
}

/// Owns the graph, the configuration and the random source, and advances
/// them one tick per [`Simulation::step`] call.
///
/// A new simulation is uninitialized: it has no graph until
/// [`Simulation::initialize`] seeds one. Resetting replaces the graph
/// wholesale; there is no way back to the uninitialized state.
///
/// The caller owns the frame loop. Nothing here sleeps, blocks or keeps
/// time.
#[derive(Debug)]
pub struct Simulation<R> {
    cfg: GrowthConfig,
    rng: R,
    graph: Option<Graph>,
    lengths: LengthBuffer,
    tick: u64,
    last_new_node: Option<NodeId>,
}

impl<R: Rng> Simulation<R> {
    /// Creates an uninitialized simulation.
    ///
    /// ### Returns
    /// - `Err(SimError::Config)` if `cfg` fails [`GrowthConfig::validate`].
    pub fn new(cfg: GrowthConfig, rng: R) -> Result<Self, SimError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng,
            graph: None,
            lengths: LengthBuffer::default(),
            tick: 0,
            last_new_node: None,
        })
    }

    /// Seeds a fresh two-node graph centered on `center`, discarding any
    /// previous graph.
    pub fn initialize(&mut self, center: Vec2) -> &Graph {
        self.tick = 0;
        self.last_new_node = None;
        self.graph.insert(Graph::seed(center, &self.cfg))
    }

    /// Replaces the current graph with a fresh seed.
    ///
    /// This is the reaction to a pointer press or a viewport resize; it
    /// is identical to [`Simulation::initialize`].
    pub fn reset(&mut self, center: Vec2) -> &Graph {
        debug!(tick = self.tick, "reset");
        self.initialize(center)
    }

    /// Advances one tick: growth, sizing, then relaxation.
    ///
    /// ### Returns
    /// - A snapshot of the graph after the tick.
    /// - `Err(SimError::Uninitialized)` before the first `initialize`.
    pub fn step(&mut self) -> Result<Frame, SimError> {
        let graph = self.graph.as_mut().ok_or(SimError::Uninitialized)?;
        self.last_new_node = phases::step(graph, &mut self.rng, &self.cfg, &mut self.lengths);
        self.tick += 1;
        Ok(Frame::from_graph(graph))
    }

    /// Replaces the configuration after validating it.
    ///
    /// The current graph is kept and its node budget follows
    /// `cfg.max_nodes` from the next tick on. Existing nodes are never
    /// removed, so a budget lowered below the current count only stops
    /// branching.
    pub fn set_config(&mut self, cfg: GrowthConfig) -> Result<(), SimError> {
        cfg.validate()?;
        if let Some(graph) = self.graph.as_mut() {
            if graph.max_nodes() != cfg.max_nodes {
                debug!(
                    from = graph.max_nodes(),
                    to = cfg.max_nodes,
                    nodes = graph.nodes.len(),
                    "node budget changed"
                );
            }
            graph.set_max_nodes(cfg.max_nodes);
        }
        self.cfg = cfg;
        Ok(())
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.cfg
    }

    /// The current graph, or `None` before the first `initialize`.
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.graph.is_some()
    }

    /// Number of ticks since the last initialize or reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Node added by the most recent tick, if it branched.
    pub fn last_new_node(&self) -> Option<NodeId> {
        self.last_new_node
    }

    /// Snapshot of the current graph without advancing it.
    pub fn frame(&self) -> Frame {
        self.graph.as_ref().map(Frame::from_graph).unwrap_or_default()
    }
}
