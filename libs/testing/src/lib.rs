//! Test fixtures for workers, items and registries.
//!
//! Expressions are written in label expression syntax; fixtures panic on
//! malformed input since they only ever see literals from tests.

use exlabel_admission::{ExclusiveRegistry, WorkItem, WorkerSnapshot};
use exlabel_labels::LabelExpr;

/// Worker named `name` carrying `labels`.
pub fn worker(name: &str, labels: &[&str]) -> WorkerSnapshot {
    WorkerSnapshot::new(name, labels.iter().copied())
}

/// Item with the given requirement text, or none.
pub fn item(requirement: Option<&str>) -> WorkItem {
    match requirement {
        Some(text) => WorkItem::with_requirement(expr(text)),
        None => WorkItem::unconstrained(),
    }
}

/// Parses a label expression.
pub fn expr(text: &str) -> LabelExpr {
    match LabelExpr::parse(text) {
        Ok(expr) => expr,
        Err(e) => panic!("bad fixture expression {text:?}: {e}"),
    }
}

/// Registry from a configuration string.
pub fn registry(config: &str) -> ExclusiveRegistry {
    ExclusiveRegistry::parse(config)
}
