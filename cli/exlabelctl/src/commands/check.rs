//! Single-pair admission check.

use anyhow::Result;
use clap::Args;
use exlabel_admission::{
    ExclusiveLabelGate, ExclusiveRegistry, LabelExpr, WorkItem, WorkerSnapshot,
};

use crate::output::{print_decision, print_single, DecisionRow, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Worker display name.
    #[arg(long, default_value = "node")]
    node: String,

    /// Worker labels, space-separated or repeated.
    #[arg(long, value_delimiter = ' ')]
    labels: Vec<String>,

    /// Item label requirement (e.g. "linux && gpu"). Omit for no requirement.
    #[arg(long)]
    requirement: Option<LabelExpr>,

    /// Exclusive label string to use instead of the configured one.
    #[arg(long)]
    exclusive: Option<String>,
}

pub fn run(ctx: CommandContext, args: CheckArgs) -> Result<()> {
    let registry = match args.exclusive.as_deref() {
        Some(source) => ExclusiveRegistry::parse(source),
        None => ctx.config.registry(),
    };

    let worker = WorkerSnapshot::new(
        args.node,
        args.labels.into_iter().filter(|l| !l.is_empty()),
    );
    let item = WorkItem {
        name: None,
        requirement: args.requirement,
    };

    let gate = ExclusiveLabelGate::new().options(ctx.config.gate_options());
    let decision = gate.can_admit(&worker, &item, &registry);

    let item_label = item
        .requirement()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    let row = DecisionRow::new(&item_label, &worker.name, &decision);

    match ctx.format {
        OutputFormat::Table => print_decision(&row),
        OutputFormat::Json => print_single(&row),
    }
    Ok(())
}
