/// Identifier for a node in a [`crate::graph::Graph`].
///
/// This is an index into `Graph::nodes`, and is only meaningful within
/// the lifetime of a given `Graph` instance.
pub type NodeId = usize;

/// Identifier for a segment in a [`crate::graph::Graph`].
///
/// An index into `Graph::segments`, in creation order.
pub type SegmentId = usize;
