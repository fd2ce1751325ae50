//! Graph storage.
//!
//! The turn policy is written against [`GraphStore`]; [`InMemoryGraph`] is the
//! adjacency-map implementation used by the session and the driver.

pub mod memory;

use std::collections::BTreeSet;

use crate::types::NodeId;

/// Trait for undirected game graphs.
///
/// Implementations must keep adjacency symmetric after every mutation and must
/// return neighbors in a deterministic order.
pub trait GraphStore {
    /// Link `a` and `b`, creating either node if it is not known yet.
    ///
    /// Idempotent: linking an existing pair changes nothing.
    fn insert_edge(&mut self, a: NodeId, b: NodeId);

    /// Whether `a` and `b` are both known and adjacent.
    fn has_edge(&self, a: NodeId, b: NodeId) -> bool;

    /// Unlink `a` and `b` in both directions.
    ///
    /// Returns `false` (and changes nothing) if there was no such edge.
    /// Nodes are never removed.
    fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool;

    /// Look up a node without creating it.
    fn find_node(&self, label: NodeId) -> Option<NodeRef<'_>>;

    /// Current neighbors of `label` in ascending label order.
    ///
    /// Empty for unknown or isolated nodes.
    fn neighbors(&self, label: NodeId) -> Vec<NodeId>;
}

/// Borrowed view of a node that exists in a graph.
///
/// The borrow ties the view to the graph state it was read from, so it cannot
/// outlive the next severance.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    id: NodeId,
    adjacent: &'a BTreeSet<NodeId>,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(id: NodeId, adjacent: &'a BTreeSet<NodeId>) -> Self {
        Self { id, adjacent }
    }

    /// Label of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of remaining links.
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }

    /// Whether every link of this node has been severed.
    pub fn is_isolated(&self) -> bool {
        self.adjacent.is_empty()
    }

    /// Whether this node links to `other`.
    pub fn is_adjacent(&self, other: NodeId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Neighbors in ascending label order.
    pub fn neighbors(&self) -> impl DoubleEndedIterator<Item = NodeId> + 'a {
        self.adjacent.iter().copied()
    }
}

pub use memory::{GraphFingerprint, InMemoryGraph};
