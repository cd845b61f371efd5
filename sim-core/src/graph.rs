use crate::{
    config::GrowthConfig,
    types::{NodeId, SegmentId},
};
use glam::Vec2;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub radius: f32,
}

/// A spring between two distinct nodes.
///
/// `desired_length` is the spring's rest length. It starts at the distance
/// between the endpoints and only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub a: NodeId,
    pub b: NodeId,
    pub desired_length: f32,
}

/// Append-only arena of nodes and the segments joining them.
///
/// Nodes and segments are stored in creation order and never removed, so
/// a [`NodeId`] stays valid for the lifetime of the graph. A reset builds
/// a new `Graph` instead of clearing this one.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub segments: Vec<Segment>,
    max_nodes: usize,
}

impl Node {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

impl Graph {
    /// Creates an empty graph that will hold at most `max_nodes` nodes.
    pub fn with_capacity(max_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(max_nodes),
            segments: Vec::with_capacity(max_nodes.saturating_sub(1)),
            max_nodes,
        }
    }

    /// Builds the seed state: two nodes `initial_branch_length` apart,
    /// centered horizontally on `center`, joined by one segment.
    pub fn seed(center: Vec2, cfg: &GrowthConfig) -> Self {
        let half = Vec2::new(cfg.initial_branch_length / 2.0, 0.0);
        let mut graph = Self::with_capacity(cfg.max_nodes);
        let a = graph.add_node(center - half, cfg.initial_radius);
        let b = graph.add_node(center + half, cfg.initial_radius);
        graph.connect(a, b);
        debug!(x = center.x, y = center.y, max_nodes = cfg.max_nodes, "seeded graph");
        graph
    }

    #[inline]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Moves the node budget. Lowering it below the current node count
    /// only stops further insertions; existing nodes are kept.
    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.max_nodes = max_nodes;
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.max_nodes
    }

    /// Appends a node and returns its id.
    ///
    /// ### Panics
    /// Panics if the graph already holds `max_nodes` nodes.
    pub fn add_node(&mut self, pos: Vec2, radius: f32) -> NodeId {
        assert!(
            !self.is_full(),
            "node budget of {} exhausted",
            self.max_nodes
        );
        let id = self.nodes.len();
        self.nodes.push(Node::new(pos, radius));
        id
    }

    /// Joins two existing nodes with a segment whose desired length is
    /// their current distance.
    ///
    /// ### Panics
    /// Panics if `a == b` or either id is not in the graph.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> SegmentId {
        assert_ne!(a, b, "segment endpoints must be distinct");
        assert!(
            a < self.nodes.len() && b < self.nodes.len(),
            "segment ({a}, {b}) references a node outside the graph of {}",
            self.nodes.len()
        );
        let desired_length = self.nodes[a].pos.distance(self.nodes[b].pos);
        let id = self.segments.len();
        self.segments.push(Segment {
            a,
            b,
            desired_length,
        });
        id
    }

    /// Adds a child node at `pos` and connects it to `parent`.
    ///
    /// ### Returns
    /// The new node's id, or `None` if the node budget is exhausted.
    pub fn add_child(&mut self, parent: NodeId, pos: Vec2, radius: f32) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let id = self.add_node(pos, radius);
        self.connect(parent, id);
        Some(id)
    }

    /// Returns mutable references to two distinct nodes.
    ///
    /// ### Panics
    /// Panics if `i == j` or either index is out of bounds.
    pub fn pair_mut(&mut self, i: NodeId, j: NodeId) -> (&mut Node, &mut Node) {
        assert_ne!(i, j);
        if i < j {
            let (lo, hi) = self.nodes.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.nodes.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(len: f32) -> GrowthConfig {
        GrowthConfig {
            initial_branch_length: len,
            ..GrowthConfig::default()
        }
    }

    #[test]
    fn seed_places_two_nodes_around_center() {
        let g = Graph::seed(Vec2::new(100.0, 100.0), &cfg(10.0));

        assert_eq!(g.nodes.len(), 2);
        assert_eq!(g.segments.len(), 1);
        assert_eq!(g.nodes[0].pos, Vec2::new(95.0, 100.0));
        assert_eq!(g.nodes[1].pos, Vec2::new(105.0, 100.0));

        let s = &g.segments[0];
        assert_eq!((s.a, s.b), (0, 1));
        assert_eq!(s.desired_length, 10.0);
    }

    #[test]
    fn seed_uses_initial_radius() {
        let c = GrowthConfig {
            initial_radius: 3.5,
            ..GrowthConfig::default()
        };
        let g = Graph::seed(Vec2::ZERO, &c);
        assert!(g.nodes.iter().all(|n| n.radius == 3.5));
    }

    #[test]
    fn add_child_connects_to_parent_with_current_distance() {
        let mut g = Graph::seed(Vec2::ZERO, &cfg(2.0));
        let child = g.add_child(1, Vec2::new(1.0, 4.0), 5.0).unwrap();

        assert_eq!(child, 2);
        let s = g.segments.last().unwrap();
        assert_eq!((s.a, s.b), (1, 2));
        assert_eq!(s.desired_length, 4.0);
    }

    #[test]
    fn add_child_respects_node_budget() {
        let c = GrowthConfig {
            max_nodes: 3,
            ..GrowthConfig::default()
        };
        let mut g = Graph::seed(Vec2::ZERO, &c);

        assert!(g.add_child(0, Vec2::new(0.0, 1.0), 5.0).is_some());
        assert!(g.is_full());
        assert_eq!(g.add_child(0, Vec2::new(0.0, 2.0), 5.0), None);
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.segments.len(), 2);
    }

    #[test]
    #[should_panic]
    fn add_node_past_budget_panics() {
        let c = GrowthConfig {
            max_nodes: 2,
            ..GrowthConfig::default()
        };
        let mut g = Graph::seed(Vec2::ZERO, &c);
        g.add_node(Vec2::ONE, 1.0);
    }

    #[test]
    #[should_panic]
    fn connect_rejects_self_loop() {
        let mut g = Graph::seed(Vec2::ZERO, &cfg(1.0));
        g.connect(1, 1);
    }

    #[test]
    #[should_panic]
    fn connect_rejects_missing_node() {
        let mut g = Graph::seed(Vec2::ZERO, &cfg(1.0));
        g.connect(0, 7);
    }

    #[test]
    fn set_max_nodes_moves_budget_both_ways() {
        let c = GrowthConfig {
            max_nodes: 2,
            ..GrowthConfig::default()
        };
        let mut g = Graph::seed(Vec2::ZERO, &c);
        assert!(g.is_full());

        g.set_max_nodes(4);
        assert_eq!(g.max_nodes(), 4);
        assert!(g.add_child(0, Vec2::new(0.0, 1.0), 5.0).is_some());

        // Lowering below the current count keeps every node.
        g.set_max_nodes(2);
        assert!(g.is_full());
        assert_eq!(g.nodes.len(), 3);
        assert_eq!(g.add_child(0, Vec2::new(0.0, 2.0), 5.0), None);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut g = Graph::seed(Vec2::ZERO, &cfg(2.0));
        {
            let (n1, n0) = g.pair_mut(1, 0);
            n1.radius = 11.0;
            n0.radius = 10.0;
        }
        assert_eq!(g.nodes[0].radius, 10.0);
        assert_eq!(g.nodes[1].radius, 11.0);
    }
}
