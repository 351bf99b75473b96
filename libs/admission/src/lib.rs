//! Exclusive label admission.
//!
//! Workers that carry an "exclusive" label are reserved: they only take work
//! whose label requirement actually asks for that exclusive capability.
//! This library provides:
//!
//! - **Registry**: the configured set of exclusive labels.
//! - **Claims**: decides whether a requirement expression claims exclusivity.
//! - **Gate**: combines worker labels, the item's requirement and the registry
//!   into an admit/reject decision.
//!
//! # Invariants
//!
//! - Every decision is a pure function of (worker, item, registry)
//! - Nothing is mutated or cached across decisions
//! - A worker with no exclusive label is never rejected by this gate
//! - A worker with an exclusive label never takes an item without a requirement

mod claims;
mod decision;
mod gate;
mod pass;
mod registry;
mod shared;
mod worker;

pub use claims::claims_exclusivity;
pub use decision::{Blockage, Decision};
pub use gate::{can_admit, Eligibility, ExclusiveLabelGate, GateOptions, LabelMatching};
pub use pass::{filter_workers, AdmissionCheck, ExclusiveLabelDispatcher, FilterResult};
pub use registry::ExclusiveRegistry;
pub use shared::SharedRegistry;
pub use worker::{WorkItem, WorkerSnapshot};

pub use exlabel_labels::{LabelAtom, LabelExpr, LabelSet};
