//! The fixed set of exit nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::node::NodeId;

/// Exit nodes the agent is trying to reach.
///
/// Built once at setup and never mutated. Iteration yields exits in the order
/// they were supplied; a repeated label keeps its first position. That order is
/// the priority order the turn policy scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct ExitSet {
    order: Vec<NodeId>,
    members: BTreeSet<NodeId>,
}

impl ExitSet {
    /// Create an exit set from labels in priority order.
    pub fn new<I>(exits: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut order = Vec::new();
        let mut members = BTreeSet::new();
        for exit in exits {
            if members.insert(exit) {
                order.push(exit);
            }
        }
        Self { order, members }
    }

    /// Create an exit set from raw labels in priority order.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::new(labels.into_iter().map(NodeId::new))
    }

    /// Iterate exits in priority order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Whether `node` is an exit.
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Number of distinct exits.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no exits at all.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Exits in priority order.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }
}

impl From<Vec<NodeId>> for ExitSet {
    fn from(exits: Vec<NodeId>) -> Self {
        Self::new(exits)
    }
}

impl From<ExitSet> for Vec<NodeId> {
    fn from(exits: ExitSet) -> Self {
        exits.order
    }
}

impl FromIterator<NodeId> for ExitSet {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self::new(iter)
    }
}
