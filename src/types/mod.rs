//! Core types for the severance kernel.

pub mod node;
pub mod edge;
pub mod exits;

pub use node::NodeId;
pub use edge::Edge;
pub use exits::ExitSet;
