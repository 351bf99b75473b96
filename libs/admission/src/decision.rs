//! Admission decisions.

use serde::Serialize;

/// Why a worker may not take an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Blockage {
    /// The worker carries an exclusive label the item does not ask for.
    NotExclusiveLabel {
        /// Display name of the rejecting worker.
        node: String,
    },
}

impl Blockage {
    pub fn not_exclusive_label(node: impl Into<String>) -> Self {
        Self::NotExclusiveLabel { node: node.into() }
    }

    /// Operator-facing description, shown as the item's blocked reason.
    pub fn short_description(&self) -> String {
        match self {
            Blockage::NotExclusiveLabel { node } => {
                format!("Node {node} has exclusive label(s)")
            }
        }
    }

    /// Display name of the worker this blockage refers to.
    pub fn node(&self) -> &str {
        match self {
            Blockage::NotExclusiveLabel { node } => node,
        }
    }
}

impl std::fmt::Display for Blockage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short_description())
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No objection; the scheduler may proceed.
    Admit,

    /// The worker must not take the item.
    Reject(Blockage),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }

    pub fn blockage(&self) -> Option<&Blockage> {
        match self {
            Decision::Admit => None,
            Decision::Reject(blockage) => Some(blockage),
        }
    }

    pub fn into_blockage(self) -> Option<Blockage> {
        match self {
            Decision::Admit => None,
            Decision::Reject(blockage) => Some(blockage),
        }
    }
}

impl From<Option<Blockage>> for Decision {
    fn from(blockage: Option<Blockage>) -> Self {
        match blockage {
            Some(blockage) => Decision::Reject(blockage),
            None => Decision::Admit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description() {
        let blockage = Blockage::not_exclusive_label("TestNode");
        assert_eq!(blockage.short_description(), "Node TestNode has exclusive label(s)");
        assert_eq!(blockage.to_string(), blockage.short_description());
        assert_eq!(blockage.node(), "TestNode");
    }

    #[test]
    fn test_decision_accessors() {
        assert!(Decision::Admit.is_admitted());
        assert!(Decision::Admit.blockage().is_none());

        let reject = Decision::Reject(Blockage::not_exclusive_label("w1"));
        assert!(!reject.is_admitted());
        assert_eq!(reject.blockage().map(Blockage::node), Some("w1"));
        assert!(reject.into_blockage().is_some());
    }

    #[test]
    fn test_decision_from_optional_blockage() {
        assert_eq!(Decision::from(None), Decision::Admit);
        let blockage = Blockage::not_exclusive_label("w1");
        assert_eq!(Decision::from(Some(blockage.clone())), Decision::Reject(blockage));
    }

    #[test]
    fn test_blockage_serializes_with_kind() {
        let json = serde_json::to_value(Blockage::not_exclusive_label("w1")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "not_exclusive_label", "node": "w1"}));
    }
}
