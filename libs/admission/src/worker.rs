//! Worker and work item snapshots read by the gate.

use std::collections::BTreeSet;

use exlabel_labels::{LabelAtom, LabelExpr};
use serde::{Deserialize, Serialize};

/// A worker as seen by one admission decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    /// Display name, used in rejection messages.
    pub name: String,

    /// Labels assigned to the worker.
    #[serde(default)]
    pub labels: BTreeSet<LabelAtom>,
}

impl WorkerSnapshot {
    pub fn new<I, L>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LabelAtom>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn has_label(&self, atom: &LabelAtom) -> bool {
        self.labels.contains(atom)
    }
}

/// A pending unit of work as seen by one admission decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Optional name for diagnostics.
    #[serde(default)]
    pub name: Option<String>,

    /// Label requirement; `None` means any worker will do.
    #[serde(default)]
    pub requirement: Option<LabelExpr>,
}

impl WorkItem {
    /// An item without a label requirement.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn with_requirement(requirement: LabelExpr) -> Self {
        Self {
            name: None,
            requirement: Some(requirement),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn requirement(&self) -> Option<&LabelExpr> {
        self.requirement.as_ref()
    }
}
