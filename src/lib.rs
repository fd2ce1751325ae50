//! # severance-kernel
//!
//! Deterministic edge severing for pursuit games on undirected graphs.
//!
//! An agent walks an undirected graph toward one of several exit nodes. Every
//! turn the kernel answers one question:
//!
//! > Given where the agent stands, which single link should be cut?
//!
//! ## Core Contract
//!
//! 1. If the agent is one hop from an exit, cut that link (exits are checked in
//!    the order they were supplied; the first match wins)
//! 2. Otherwise cut one of the agent's links, picked by a fixed rule
//! 3. If there is nothing to cut, say so explicitly instead of inventing an edge
//!
//! ## Architecture
//!
//! ```text
//! Agent position → EdgeSeverer (SeverPolicyV1) → Severance
//!                        ↓
//!                  GraphStore (InMemoryGraph)
//! ```
//!
//! [`GameSession`] owns the graph for one game and [`protocol`] reads and
//! writes the referee's line format; the `severance_driver` binary wires both
//! to stdin and stdout.
//!
//! ## Determinism Guarantees
//!
//! - Same graph + same exits + same agent position → same severance
//! - Neighbor iteration is ordered by node label
//! - Graph fingerprints do not depend on insertion order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod store;
pub mod severer;
pub mod canonical;
pub mod protocol;
pub mod session;

// Re-exports
pub use types::{NodeId, Edge, ExitSet};
pub use policy::{SeverPolicyV1, FallbackChoice};
pub use store::{GraphStore, NodeRef, InMemoryGraph, GraphFingerprint};
pub use severer::{EdgeSeverer, Severance, SeverReason, SeverError};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use protocol::{GameSetup, SetupHeader, ProtocolError, read_agent_position, format_severance};
pub use session::{run, GameSession, SessionError};

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "sever_policy_v1";
