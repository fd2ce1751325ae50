//! Node identifiers for the game graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of a node in the game graph.
///
/// Labels are opaque integers from the level data. They carry no meaning beyond
/// equality, but implement `Ord` so that every collection keyed by them iterates
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(i64);

impl NodeId {
    /// Create a new NodeId from a raw label.
    pub const fn new(label: i64) -> Self {
        Self(label)
    }

    /// Parse a NodeId from its decimal text form.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }

    /// Get the raw label.
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(label: i64) -> Self {
        Self(label)
    }
}
