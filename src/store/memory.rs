//! In-memory adjacency-map graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::{Edge, NodeId};
use super::{GraphStore, NodeRef};

/// Deterministic fingerprint of a graph state (xxh64, hex encoded).
///
/// Two graphs with the same node set and the same links have the same
/// fingerprint, whatever order they were built in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphFingerprint(String);

impl GraphFingerprint {
    /// Get the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical form hashed into a [`GraphFingerprint`].
#[derive(Serialize)]
struct FingerprintInput<'a> {
    nodes: Vec<&'a NodeId>,
    edges: Vec<Edge>,
}

/// Undirected graph stored as a label -> neighbor-set map.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order. Each link is
/// recorded under both endpoints; every mutation updates both sides.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl InMemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of edges.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(edge.from, edge.to);
        }
        graph
    }

    /// Build a graph from raw label pairs.
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        Self::from_edges(links.into_iter().map(Edge::from))
    }

    /// Whether `label` is a known node.
    pub fn contains_node(&self, label: NodeId) -> bool {
        self.adjacency.contains_key(&label)
    }

    /// Number of remaining links of `label` (0 for unknown nodes).
    pub fn degree(&self, label: NodeId) -> usize {
        self.adjacency.get(&label).map_or(0, BTreeSet::len)
    }

    /// Get number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Get number of links.
    pub fn num_edges(&self) -> usize {
        self.adjacency
            .iter()
            .map(|(id, adjacent)| adjacent.range(*id..).count())
            .sum()
    }

    /// All node labels in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Every link once, in canonical form and sorted.
    pub fn edges(&self) -> Vec<Edge> {
        self.adjacency
            .iter()
            .flat_map(|(id, adjacent)| {
                adjacent
                    .range(*id..)
                    .map(move |other| Edge::new(*id, *other))
            })
            .collect()
    }

    /// Compute a fingerprint of the current nodes and links.
    pub fn fingerprint(&self) -> GraphFingerprint {
        let input = FingerprintInput {
            nodes: self.adjacency.keys().collect(),
            edges: self.edges(),
        };
        GraphFingerprint(canonical_hash_hex(&input))
    }
}

impl GraphStore for InMemoryGraph {
    fn insert_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            self.adjacency.entry(a).or_default();
            return;
        }

        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        match (self.adjacency.get(&a), self.adjacency.get(&b)) {
            (Some(from_a), Some(from_b)) => from_a.contains(&b) && from_b.contains(&a),
            _ => false,
        }
    }

    fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.has_edge(a, b) {
            return false;
        }

        if let Some(adjacent) = self.adjacency.get_mut(&a) {
            adjacent.remove(&b);
        }
        if let Some(adjacent) = self.adjacency.get_mut(&b) {
            adjacent.remove(&a);
        }
        true
    }

    fn find_node(&self, label: NodeId) -> Option<NodeRef<'_>> {
        self.adjacency
            .get_key_value(&label)
            .map(|(id, adjacent)| NodeRef::new(*id, adjacent))
    }

    fn neighbors(&self, label: NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(&label)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(label: i64) -> NodeId {
        NodeId::new(label)
    }

    #[test]
    fn test_insert_creates_both_nodes() {
        let mut graph = InMemoryGraph::new();
        graph.insert_edge(n(1), n(2));

        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_edges(), 1);
        assert!(graph.has_edge(n(1), n(2)));
        assert!(graph.has_edge(n(2), n(1)));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut graph = InMemoryGraph::new();
        graph.insert_edge(n(1), n(2));
        graph.insert_edge(n(1), n(2));
        graph.insert_edge(n(2), n(1));

        assert_eq!(graph.neighbors(n(1)), vec![n(2)]);
        assert_eq!(graph.neighbors(n(2)), vec![n(1)]);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_self_loop_adds_node_only() {
        let mut graph = InMemoryGraph::new();
        graph.insert_edge(n(4), n(4));

        assert!(graph.contains_node(n(4)));
        assert!(!graph.has_edge(n(4), n(4)));
        assert_eq!(graph.degree(n(4)), 0);
    }

    #[test]
    fn test_remove_keeps_nodes() {
        let mut graph = InMemoryGraph::from_links([(1, 2), (2, 3)]);

        assert!(graph.remove_edge(n(2), n(1)));
        assert!(!graph.has_edge(n(1), n(2)));
        assert!(!graph.has_edge(n(2), n(1)));

        let isolated = graph.find_node(n(1)).unwrap();
        assert!(isolated.is_isolated());
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut graph = InMemoryGraph::from_links([(1, 2)]);
        let before = graph.fingerprint();

        assert!(!graph.remove_edge(n(1), n(3)));
        assert!(!graph.remove_edge(n(8), n(9)));
        assert_eq!(graph.fingerprint(), before);
    }

    #[test]
    fn test_find_node_does_not_create() {
        let graph = InMemoryGraph::from_links([(1, 2)]);

        assert!(graph.find_node(n(5)).is_none());
        assert!(!graph.contains_node(n(5)));
        assert_eq!(graph.num_nodes(), 2);
        assert!(graph.neighbors(n(5)).is_empty());
        assert!(!graph.has_edge(n(5), n(1)));
    }

    #[test]
    fn test_neighbors_sorted() {
        let graph = InMemoryGraph::from_links([(0, 9), (0, 3), (0, 5)]);
        assert_eq!(graph.neighbors(n(0)), vec![n(3), n(5), n(9)]);

        let node = graph.find_node(n(0)).unwrap();
        assert_eq!(node.degree(), 3);
        assert!(node.is_adjacent(n(5)));
        assert_eq!(node.neighbors().next_back(), Some(n(9)));
    }

    #[test]
    fn test_edges_listed_once() {
        let graph = InMemoryGraph::from_links([(3, 1), (2, 1), (1, 3)]);
        assert_eq!(graph.edges(), vec![Edge::from_labels(1, 2), Edge::from_labels(1, 3)]);
    }

    #[test]
    fn test_fingerprint_ignores_build_order() {
        let g1 = InMemoryGraph::from_links([(1, 2), (2, 3), (3, 1)]);
        let g2 = InMemoryGraph::from_links([(3, 1), (3, 2), (2, 1)]);
        assert_eq!(g1.fingerprint(), g2.fingerprint());

        let mut g3 = g1.clone();
        g3.remove_edge(n(1), n(2));
        assert_ne!(g1.fingerprint(), g3.fingerprint());
    }
}
