//! Edge types for the game graph.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::node::NodeId;

/// An undirected link between two nodes.
///
/// The endpoints keep the orientation they were created with, because a severed
/// edge is reported as `(agent_position, other_endpoint)`. Identity of the link
/// itself ignores orientation: use [`Edge::same_link`] or [`Edge::canonical`]
/// to compare links.
///
/// Implements `Ord` over the canonical form first, then orientation, so sorted
/// edge lists are stable regardless of how the edges were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint (the agent's side for a severance).
    pub from: NodeId,
    /// Second endpoint.
    pub to: NodeId,
}

impl Edge {
    /// Create a new edge with the given orientation.
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    /// Create an edge from raw labels.
    pub fn from_labels(from: i64, to: i64) -> Self {
        Self::new(NodeId::new(from), NodeId::new(to))
    }

    /// The same link with endpoints in ascending label order.
    pub fn canonical(&self) -> Self {
        if self.from <= self.to {
            *self
        } else {
            self.reversed()
        }
    }

    /// The same link seen from the other endpoint.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Whether both edges describe the same undirected link.
    pub fn same_link(&self, other: &Edge) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

impl From<(i64, i64)> for Edge {
    fn from((from, to): (i64, i64)) -> Self {
        Self::from_labels(from, to)
    }
}

// Canonical ordering: lower endpoint, higher endpoint, then orientation
impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.canonical(), other.canonical());
        match a.from.cmp(&b.from) {
            Ordering::Equal => match a.to.cmp(&b.to) {
                Ordering::Equal => self.from.cmp(&other.from),
                ord => ord,
            },
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_link_ignores_orientation() {
        let e1 = Edge::from_labels(1, 2);
        let e2 = Edge::from_labels(2, 1);

        assert_ne!(e1, e2);
        assert!(e1.same_link(&e2));
        assert_eq!(e1.canonical(), e2.canonical());
        assert!(!e1.same_link(&Edge::from_labels(1, 3)));
    }

    #[test]
    fn test_edge_ordering() {
        let mut edges = vec![Edge::from_labels(3, 1), Edge::from_labels(2, 5), Edge::from_labels(1, 2)];
        edges.sort();

        assert_eq!(edges, vec![Edge::from_labels(1, 2), Edge::from_labels(3, 1), Edge::from_labels(2, 5)]);
    }

    #[test]
    fn test_display_keeps_orientation() {
        assert_eq!(Edge::from_labels(7, 4).to_string(), "7 4");
    }
}
