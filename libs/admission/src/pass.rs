//! Running the gate over a scheduling pass.
//!
//! The scheduler asks once per (worker, pending item) pair. A pass binds the
//! gate to one registry snapshot so every answer in the pass sees the same
//! exclusive labels.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::decision::{Blockage, Decision};
use crate::gate::{Eligibility, ExclusiveLabelGate, LabelMatching};
use crate::registry::ExclusiveRegistry;
use crate::shared::SharedRegistry;
use crate::worker::{WorkItem, WorkerSnapshot};

/// A per-pair admission check the scheduler consults before assignment.
pub trait AdmissionCheck {
    /// Returns whether `worker` may take `item`.
    fn can_take(&self, worker: &WorkerSnapshot, item: &WorkItem) -> Decision;
}

/// The exclusive label gate bound to a registry snapshot.
#[derive(Debug, Clone)]
pub struct ExclusiveLabelDispatcher<E = LabelMatching> {
    gate: ExclusiveLabelGate<E>,
    registry: Arc<ExclusiveRegistry>,
}

impl<E: Eligibility> ExclusiveLabelDispatcher<E> {
    pub fn new(gate: ExclusiveLabelGate<E>, registry: Arc<ExclusiveRegistry>) -> Self {
        Self { gate, registry }
    }

    /// Binds the gate to the current contents of `shared`.
    pub fn from_shared(gate: ExclusiveLabelGate<E>, shared: &SharedRegistry) -> Self {
        Self::new(gate, shared.snapshot())
    }

    pub fn registry(&self) -> &ExclusiveRegistry {
        &self.registry
    }
}

impl<E: Eligibility> AdmissionCheck for ExclusiveLabelDispatcher<E> {
    fn can_take(&self, worker: &WorkerSnapshot, item: &WorkItem) -> Decision {
        self.gate.can_admit(worker, item, &self.registry)
    }
}

/// Workers split by the admission check, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterResult {
    /// Names of workers that may take the item.
    pub admitted: Vec<String>,

    /// Workers that may not, with the reason.
    pub blocked: Vec<(String, Blockage)>,

    /// One decision per input worker, in input order. Names may repeat.
    #[serde(skip)]
    pub decisions: Vec<Decision>,
}

impl FilterResult {
    pub fn is_admitted(&self, worker: &str) -> bool {
        self.admitted.iter().any(|w| w == worker)
    }

    /// Blockage for the first worker named `worker`, if it was rejected.
    pub fn blockage(&self, worker: &str) -> Option<&Blockage> {
        self.blocked
            .iter()
            .find(|(w, _)| w == worker)
            .map(|(_, b)| b)
    }
}

/// Checks one pending item against every worker.
#[instrument(skip_all, fields(item = item.name.as_deref().unwrap_or("-"), workers = workers.len()))]
pub fn filter_workers<C: AdmissionCheck + ?Sized>(
    check: &C,
    workers: &[WorkerSnapshot],
    item: &WorkItem,
) -> FilterResult {
    let mut result = FilterResult::default();

    for worker in workers {
        let decision = check.can_take(worker, item);
        match &decision {
            Decision::Admit => result.admitted.push(worker.name.clone()),
            Decision::Reject(blockage) => {
                result.blocked.push((worker.name.clone(), blockage.clone()))
            }
        }
        result.decisions.push(decision);
    }

    debug!(
        admitted = result.admitted.len(),
        blocked = result.blocked.len(),
        "Filtered workers for item"
    );

    result
}
