//! End-to-end admission scenarios.
//!
//! Each case runs the default gate (base label matching for eligibility)
//! against a registry holding the single exclusive label `excl`.

use std::sync::Arc;
use std::thread;

use exlabel_admission::{
    can_admit, filter_workers, Blockage, ExclusiveLabelDispatcher, ExclusiveLabelGate,
    LabelExpr, SharedRegistry, WorkerSnapshot,
};
use exlabel_testing::{item, registry, worker};
use rstest::rstest;

#[rstest]
#[case::unconstrained_item_on_exclusive_worker(&["excl"], None, false)]
#[case::item_asks_for_exclusive_label(&["excl"], Some("excl"), true)]
#[case::worker_outside_base_eligibility(&["excl"], Some("other"), true)]
#[case::and_behaves_as_or(&["excl", "other"], Some("other && excl"), true)]
#[case::and_with_ineligible_worker(&["excl"], Some("other && excl"), true)]
#[case::plain_worker_unconstrained(&["plain"], None, true)]
#[case::plain_worker_any_requirement(&["plain"], Some("plain || !excl"), true)]
#[case::explicit_opt_out(&["excl", "other"], Some("!excl || other"), false)]
#[case::negated_regular_label(&["excl"], Some("!other"), true)]
#[case::implies_with_exclusive_antecedent(&["excl", "linux"], Some("excl -> linux"), false)]
#[case::implies_with_exclusive_consequent(&["excl", "linux"], Some("linux -> excl"), true)]
#[case::negated_group(&["excl"], Some("!(other)"), false)]
#[case::worker_without_labels(&[], None, true)]
fn test_scenario(
    #[case] labels: &[&str],
    #[case] requirement: Option<&str>,
    #[case] admitted: bool,
) {
    let w = worker("W", labels);
    let decision = can_admit(&w, &item(requirement), &registry("excl"));

    assert_eq!(decision.is_admitted(), admitted, "decision: {decision:?}");
    if let Some(blockage) = decision.blockage() {
        assert_eq!(blockage.node(), "W");
        assert_eq!(blockage.short_description(), "Node W has exclusive label(s)");
    }
}

#[test]
fn test_opt_out_of_sole_exclusive_label_is_rejected() {
    // `!excl` on its own excludes W through base matching, so a permissive
    // host verdict is used to reach the exclusivity check.
    let gate = ExclusiveLabelGate::with_eligibility(|_: &LabelExpr, _: &WorkerSnapshot| true);
    let decision = gate.can_admit(&worker("W", &["excl"]), &item(Some("!excl")), &registry("excl"));

    assert_eq!(decision.into_blockage(), Some(Blockage::not_exclusive_label("W")));
}

#[test]
fn test_ineligible_worker_skips_exclusivity_check() {
    let gate = ExclusiveLabelGate::with_eligibility(|_: &LabelExpr, _: &WorkerSnapshot| false);

    for requirement in ["other", "!excl", "excl -> other"] {
        let decision =
            gate.can_admit(&worker("W", &["excl"]), &item(Some(requirement)), &registry("excl"));
        assert!(decision.is_admitted(), "{requirement} should defer to base matching");
    }
}

#[test]
fn test_registry_roundtrip_feeds_gate() {
    let original = registry("exclusive1 exclusive2");
    let reloaded = exlabel_admission::ExclusiveRegistry::from_config(original.config_string());

    let w = worker("node-a", &["exclusive2"]);
    assert_eq!(
        can_admit(&w, &item(None), &original),
        can_admit(&w, &item(None), &reloaded)
    );
    assert!(!can_admit(&w, &item(None), &reloaded).is_admitted());
}

#[test]
fn test_pass_over_mixed_fleet() {
    let shared = SharedRegistry::new(registry("gpu fpga"));
    let dispatcher = ExclusiveLabelDispatcher::from_shared(ExclusiveLabelGate::new(), &shared);
    let fleet = vec![
        worker("plain-1", &["linux"]),
        worker("gpu-1", &["linux", "gpu"]),
        worker("fpga-1", &["linux", "fpga"]),
    ];

    let linux = filter_workers(&dispatcher, &fleet, &item(Some("linux")));
    assert_eq!(linux.admitted, vec!["plain-1".to_string()]);
    assert!(linux.blockage("gpu-1").is_some());
    assert!(linux.blockage("fpga-1").is_some());

    let gpu = filter_workers(&dispatcher, &fleet, &item(Some("linux && gpu")));
    assert!(gpu.is_admitted("plain-1"));
    assert!(gpu.is_admitted("gpu-1"));
    assert!(gpu.is_admitted("fpga-1"));
    assert!(gpu.blocked.is_empty());
}

#[test]
fn test_concurrent_decisions_share_snapshot() {
    let snapshot = Arc::new(registry("excl"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let snapshot = Arc::clone(&snapshot);
            thread::spawn(move || {
                let w = worker(&format!("w{i}"), &["excl"]);
                let requirement = if i % 2 == 0 { None } else { Some("excl") };
                (i, can_admit(&w, &item(requirement), &snapshot).is_admitted())
            })
        })
        .collect();

    for handle in handles {
        let (i, admitted) = handle.join().unwrap();
        assert_eq!(admitted, i % 2 == 1);
    }
}
