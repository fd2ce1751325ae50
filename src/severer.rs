//! Per-turn edge severer.
//!
//! Given the agent's position and the exit set, the severer picks one link,
//! removes it from the graph and reports it.

use serde::{Deserialize, Serialize};

use crate::policy::SeverPolicyV1;
use crate::store::GraphStore;
use crate::types::{Edge, ExitSet, NodeId};

/// Error type for severer operations.
///
/// Both variants leave the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeverError {
    /// The agent is on a node the graph has never seen.
    #[error("Agent node not found: {0}")]
    UnknownNode(NodeId),
    /// Every link of the agent's node has already been cut.
    #[error("Agent node {0} has no links left to sever")]
    NoNeighbors(NodeId),
}

/// Why a link was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum SeverReason {
    /// The agent was one hop from this exit.
    ExitLink {
        /// The exit that was cut off.
        exit: NodeId,
    },
    /// No exit was adjacent; a neighbor was chosen by the fallback rule.
    Fallback,
}

/// A link chosen for this turn.
///
/// `edge.from` is always the agent's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Severance {
    /// The link, oriented `(agent, other)`.
    pub edge: Edge,
    /// Which tier produced it.
    pub reason: SeverReason,
}

impl Severance {
    /// Whether the cut blocked a direct path to an exit.
    pub fn is_exit_link(&self) -> bool {
        matches!(self.reason, SeverReason::ExitLink { .. })
    }
}

/// Greedy edge severer.
///
/// ## Algorithm
///
/// 1. Unknown agent node: [`SeverError::UnknownNode`]
/// 2. Scan exits in exit-set order; the first exit linked to the agent is cut
/// 3. Otherwise cut the link to one neighbor, chosen by the policy's fallback
/// 4. No neighbors left: [`SeverError::NoNeighbors`]
///
/// The severer keeps no state between turns. Everything it knows about the
/// game comes from the graph it is handed each call.
#[derive(Debug, Clone, Default)]
pub struct EdgeSeverer {
    policy: SeverPolicyV1,
}

impl EdgeSeverer {
    /// Create a severer with the given policy.
    pub fn new(policy: SeverPolicyV1) -> Self {
        Self { policy }
    }

    /// Choose the link to cut without touching the graph.
    pub fn plan<S: GraphStore + ?Sized>(
        &self,
        graph: &S,
        agent: NodeId,
        exits: &ExitSet,
    ) -> Result<Severance, SeverError> {
        let node = graph
            .find_node(agent)
            .ok_or(SeverError::UnknownNode(agent))?;

        if let Some(exit) = exits.iter().find(|&exit| graph.has_edge(agent, exit)) {
            return Ok(Severance {
                edge: Edge::new(agent, exit),
                reason: SeverReason::ExitLink { exit },
            });
        }

        let other = self
            .policy
            .fallback
            .pick(node.neighbors())
            .ok_or(SeverError::NoNeighbors(agent))?;

        Ok(Severance {
            edge: Edge::new(agent, other),
            reason: SeverReason::Fallback,
        })
    }

    /// Choose a link, remove it from the graph and return it.
    pub fn sever<S: GraphStore + ?Sized>(
        &self,
        graph: &mut S,
        agent: NodeId,
        exits: &ExitSet,
    ) -> Result<Severance, SeverError> {
        let severance = match self.plan(&*graph, agent, exits) {
            Ok(severance) => severance,
            Err(e) => {
                tracing::warn!(agent = %agent, error = %e, "no link to sever this turn");
                return Err(e);
            }
        };

        graph.remove_edge(severance.edge.from, severance.edge.to);

        match severance.reason {
            SeverReason::ExitLink { exit } => {
                tracing::debug!(agent = %agent, exit = %exit, "agent adjacent to exit, cutting exit link");
            }
            SeverReason::Fallback => {
                tracing::debug!(
                    agent = %agent,
                    neighbor = %severance.edge.to,
                    fallback = %self.policy.fallback,
                    "no exit adjacent, cutting fallback link"
                );
            }
        }

        Ok(severance)
    }

    /// Get the policy.
    pub fn policy(&self) -> &SeverPolicyV1 {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FallbackChoice;
    use crate::store::InMemoryGraph;

    fn n(label: i64) -> NodeId {
        NodeId::new(label)
    }

    #[test]
    fn test_exit_order_decides_priority() {
        let mut graph = InMemoryGraph::from_links([(1, 2), (1, 3)]);
        let exits = ExitSet::from_labels([3, 2]);

        let severance = EdgeSeverer::default().sever(&mut graph, n(1), &exits).unwrap();

        assert_eq!(severance.edge, Edge::from_labels(1, 3));
        assert_eq!(severance.reason, SeverReason::ExitLink { exit: n(3) });
        assert!(!graph.has_edge(n(1), n(3)));
        assert!(graph.has_edge(n(1), n(2)));
    }

    #[test]
    fn test_fallback_when_no_exit_adjacent() {
        let mut graph = InMemoryGraph::from_links([(1, 4)]);
        let exits = ExitSet::from_labels([3]);

        let severance = EdgeSeverer::default().sever(&mut graph, n(1), &exits).unwrap();

        assert_eq!(severance.edge, Edge::from_labels(1, 4));
        assert_eq!(severance.reason, SeverReason::Fallback);
        assert!(!severance.is_exit_link());
        assert!(!graph.has_edge(n(1), n(4)));
    }

    #[test]
    fn test_fallback_choice_is_respected() {
        let graph = InMemoryGraph::from_links([(0, 7), (0, 2), (0, 5)]);
        let exits = ExitSet::from_labels([9]);

        let lowest = EdgeSeverer::new(SeverPolicyV1::new(FallbackChoice::LowestLabel));
        let highest = EdgeSeverer::new(SeverPolicyV1::new(FallbackChoice::HighestLabel));

        assert_eq!(lowest.plan(&graph, n(0), &exits).unwrap().edge, Edge::from_labels(0, 2));
        assert_eq!(highest.plan(&graph, n(0), &exits).unwrap().edge, Edge::from_labels(0, 7));
    }

    #[test]
    fn test_unknown_agent() {
        let mut graph = InMemoryGraph::from_links([(1, 2)]);
        let exits = ExitSet::from_labels([2]);
        let before = graph.fingerprint();

        let err = EdgeSeverer::default().sever(&mut graph, n(42), &exits).unwrap_err();

        assert_eq!(err, SeverError::UnknownNode(n(42)));
        assert!(!graph.contains_node(n(42)));
        assert_eq!(graph.fingerprint(), before);
    }

    #[test]
    fn test_isolated_agent() {
        let mut graph = InMemoryGraph::from_links([(1, 2)]);
        graph.remove_edge(n(1), n(2));

        let err = EdgeSeverer::default()
            .sever(&mut graph, n(1), &ExitSet::from_labels([2]))
            .unwrap_err();

        assert_eq!(err, SeverError::NoNeighbors(n(1)));
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let graph = InMemoryGraph::from_links([(1, 2)]);
        let before = graph.fingerprint();

        let severance = EdgeSeverer::default().plan(&graph, n(1), &ExitSet::from_labels([2])).unwrap();

        assert!(severance.is_exit_link());
        assert_eq!(graph.fingerprint(), before);
    }

    #[test]
    fn test_agent_on_exit_with_links() {
        // The exit tier only looks at links from the agent to an exit.
        let mut graph = InMemoryGraph::from_links([(3, 8)]);
        let severance = EdgeSeverer::default()
            .sever(&mut graph, n(3), &ExitSet::from_labels([3]))
            .unwrap();

        assert_eq!(severance.edge, Edge::from_labels(3, 8));
        assert_eq!(severance.reason, SeverReason::Fallback);
    }
}
