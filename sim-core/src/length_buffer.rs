use crate::{graph::Segment, types::NodeId};

/// A scratch buffer that accumulates incident segment lengths per node.
///
/// For each `NodeId`, this buffer stores:
///
/// - The sum of the desired lengths of all segments touching the node.
/// - The number of segments that were added.
///
/// Filling it takes one pass over the segments, after which the
/// **average** incident length of every node can be queried. This is what
/// the sizing pass needs, without rescanning every segment for every node.
///
/// Internally, `sum[i]` and `count[i]` correspond to node `i`.
#[derive(Debug, Default)]
pub struct LengthBuffer {
    /// Accumulated desired lengths for each node.
    sum: Vec<f32>,
    /// Number of incident segments for each node.
    pub count: Vec<u32>,
}

impl LengthBuffer {
    /// Ensures that the internal storage has exactly the given length.
    ///
    /// After this call all entries are cleared, even if the length was
    /// already correct.
    ///
    /// ### Parameters
    /// - `len` - Desired length of the internal buffers.
    pub fn ensure_len(&mut self, len: usize) {
        if self.sum.len() != len {
            self.sum.resize(len, 0.0);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    /// Resets all sums and counts to zero, keeping the length.
    pub fn clear(&mut self) {
        self.sum.fill(0.0);
        self.count.fill(0);
    }

    /// Adds one segment length to the given node.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: NodeId, length: f32) {
        self.sum[id] += length;
        self.count[id] += 1;
    }

    /// Resizes to `len` nodes and accumulates every segment into both of
    /// its endpoints.
    ///
    /// Segments are visited in slice order, so each node's sum is built in
    /// the same order as a per-node scan over `segments` would build it.
    ///
    /// ### Parameters
    /// - `len` - Number of nodes in the graph.
    /// - `segments` - Segments whose desired lengths are accumulated.
    pub fn accumulate(&mut self, len: usize, segments: &[Segment]) {
        self.ensure_len(len);
        for s in segments {
            self.add(s.a, s.desired_length);
            self.add(s.b, s.desired_length);
        }
    }

    /// Returns the average accumulated length for a node, or `None` if no
    /// segment touches it.
    #[inline]
    pub fn average(&self, id: NodeId) -> Option<f32> {
        match self.count[id] {
            0 => None,
            c => Some(self.sum[id] / c as f32),
        }
    }
}
