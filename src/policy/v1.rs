//! SeverPolicy v1: exit links first, then a deterministic fallback neighbor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;

/// How to pick the edge to cut when the agent is not next to any exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackChoice {
    /// Cut the link to the neighbor with the smallest label.
    #[default]
    LowestLabel,
    /// Cut the link to the neighbor with the largest label.
    HighestLabel,
}

impl FallbackChoice {
    /// Parse a fallback choice from its config name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lowest" | "lowest_label" => Some(Self::LowestLabel),
            "highest" | "highest_label" => Some(Self::HighestLabel),
            _ => None,
        }
    }

    /// Pick one neighbor from an ascending sequence.
    pub fn pick<I>(&self, mut ascending: I) -> Option<I::Item>
    where
        I: DoubleEndedIterator,
    {
        match self {
            Self::LowestLabel => ascending.next(),
            Self::HighestLabel => ascending.next_back(),
        }
    }
}

impl fmt::Display for FallbackChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowestLabel => write!(f, "lowest_label"),
            Self::HighestLabel => write!(f, "highest_label"),
        }
    }
}

/// Severance policy version 1.
///
/// ## Parameters
///
/// - `fallback`: neighbor selection when no exit is adjacent
///
/// Exit links are always cut first, in exit-set order; that tier is not
/// configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverPolicyV1 {
    /// Policy version identifier.
    pub version: String,
    /// Fallback neighbor selection.
    pub fallback: FallbackChoice,
}

impl SeverPolicyV1 {
    /// Create a policy with the given fallback choice.
    pub fn new(fallback: FallbackChoice) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            fallback,
        }
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the policy parameters.
    ///
    /// Identical parameters give identical hashes across runs, so the value can
    /// be logged next to decisions and compared later.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}

impl Default for SeverPolicyV1 {
    fn default() -> Self {
        Self::new(FallbackChoice::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_from_str() {
        assert_eq!(FallbackChoice::from_str("lowest"), Some(FallbackChoice::LowestLabel));
        assert_eq!(FallbackChoice::from_str(" HIGHEST "), Some(FallbackChoice::HighestLabel));
        assert_eq!(FallbackChoice::from_str("random"), None);
    }

    #[test]
    fn test_fallback_pick() {
        let labels = [2, 5, 9];
        assert_eq!(FallbackChoice::LowestLabel.pick(labels.iter()), Some(&2));
        assert_eq!(FallbackChoice::HighestLabel.pick(labels.iter()), Some(&9));
        assert_eq!(FallbackChoice::LowestLabel.pick(std::iter::empty::<i64>()), None);
    }

    #[test]
    fn test_policy_params_hash_determinism() {
        let policy1 = SeverPolicyV1::default();
        let policy2 = SeverPolicyV1::default();

        assert_eq!(policy1.params_hash(), policy2.params_hash());
        assert_eq!(policy1.policy_id(), DEFAULT_POLICY_VERSION);
    }

    #[test]
    fn test_policy_params_hash_changes() {
        let policy1 = SeverPolicyV1::default();
        let policy2 = SeverPolicyV1::new(FallbackChoice::HighestLabel);

        assert_ne!(policy1.params_hash(), policy2.params_hash());
    }
}
