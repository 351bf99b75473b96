//! The exclusive label admission gate.
//!
//! Decision procedure, in order, stopping at the first verdict:
//!
//! 1. If the item has a requirement the worker is not eligible for at all,
//!    admit. Base eligibility is the host's concern and is rejected elsewhere.
//! 2. Collect the worker's labels that are exclusive. An item without a
//!    requirement is rejected as soon as one is found.
//! 3. A worker with no exclusive label is admitted.
//! 4. Otherwise the requirement must claim exclusivity over the worker's
//!    exclusive labels, or the worker is rejected.

use std::collections::HashSet;

use exlabel_labels::{LabelAtom, LabelExpr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::claims::claims_exclusivity;
use crate::decision::{Blockage, Decision};
use crate::registry::ExclusiveRegistry;
use crate::worker::{WorkItem, WorkerSnapshot};

/// Host verdict on whether a worker is a candidate for a requirement,
/// independent of exclusivity.
pub trait Eligibility {
    fn is_eligible(&self, requirement: &LabelExpr, worker: &WorkerSnapshot) -> bool;
}

/// Base label matching: the requirement evaluated as a boolean formula over
/// the worker's labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelMatching;

impl Eligibility for LabelMatching {
    fn is_eligible(&self, requirement: &LabelExpr, worker: &WorkerSnapshot) -> bool {
        requirement.matches(&worker.labels)
    }
}

impl<F> Eligibility for F
where
    F: Fn(&LabelExpr, &WorkerSnapshot) -> bool,
{
    fn is_eligible(&self, requirement: &LabelExpr, worker: &WorkerSnapshot) -> bool {
        self(requirement, worker)
    }
}

/// Gate behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOptions {
    /// Also reject when none of the worker's exclusive label names occurs in
    /// the requirement's text, before evaluating exclusivity claims.
    #[serde(default)]
    pub require_name_mention: bool,
}

/// Admission gate for workers carrying exclusive labels.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveLabelGate<E = LabelMatching> {
    eligibility: E,
    options: GateOptions,
}

impl ExclusiveLabelGate<LabelMatching> {
    /// Gate using base label matching and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Eligibility> ExclusiveLabelGate<E> {
    /// Gate using a host-supplied eligibility rule.
    pub fn with_eligibility(eligibility: E) -> Self {
        Self {
            eligibility,
            options: GateOptions::default(),
        }
    }

    pub fn options(mut self, options: GateOptions) -> Self {
        self.options = options;
        self
    }

    /// Decides whether `worker` may take `item` given the exclusive labels.
    pub fn can_admit(
        &self,
        worker: &WorkerSnapshot,
        item: &WorkItem,
        registry: &ExclusiveRegistry,
    ) -> Decision {
        let requirement = item.requirement();

        if let Some(requirement) = requirement {
            if !self.eligibility.is_eligible(requirement, worker) {
                debug!(
                    worker = %worker.name,
                    requirement = %requirement,
                    "Worker not eligible for requirement, deferring to base matching"
                );
                return Decision::Admit;
            }
        }

        let mut touched: HashSet<&LabelAtom> = HashSet::new();
        for label in &worker.labels {
            if registry.contains(label) {
                if requirement.is_none() {
                    debug!(
                        worker = %worker.name,
                        label = %label,
                        "Exclusive worker rejects item without requirement"
                    );
                    return reject(worker);
                }
                touched.insert(label);
            }
        }

        let Some(requirement) = requirement else {
            debug!(worker = %worker.name, "No exclusive label on worker, admitting");
            return Decision::Admit;
        };
        if touched.is_empty() {
            debug!(worker = %worker.name, "No exclusive label on worker, admitting");
            return Decision::Admit;
        }

        if self.options.require_name_mention && !mentions_any(requirement, &touched) {
            debug!(
                worker = %worker.name,
                requirement = %requirement,
                "Requirement does not name any exclusive label of the worker"
            );
            return reject(worker);
        }

        let exclusive: HashSet<LabelAtom> = touched.into_iter().cloned().collect();
        if !claims_exclusivity(requirement, &exclusive) {
            debug!(
                worker = %worker.name,
                requirement = %requirement,
                exclusive = ?exclusive,
                "Requirement does not claim exclusivity"
            );
            return reject(worker);
        }

        debug!(
            worker = %worker.name,
            requirement = %requirement,
            "Requirement claims exclusivity, admitting"
        );
        Decision::Admit
    }
}

/// Decides with base label matching and default options.
pub fn can_admit(
    worker: &WorkerSnapshot,
    item: &WorkItem,
    registry: &ExclusiveRegistry,
) -> Decision {
    ExclusiveLabelGate::new().can_admit(worker, item, registry)
}

fn reject(worker: &WorkerSnapshot) -> Decision {
    Decision::Reject(Blockage::not_exclusive_label(worker.display_name()))
}

fn mentions_any(requirement: &LabelExpr, labels: &HashSet<&LabelAtom>) -> bool {
    requirement.atoms().into_iter().any(|atom| labels.contains(atom))
}
