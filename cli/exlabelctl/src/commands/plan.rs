//! Decide every pending item against every worker in a cluster file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use exlabel_admission::{
    filter_workers, ExclusiveLabelDispatcher, ExclusiveLabelGate, ExclusiveRegistry,
    SharedRegistry,
};
use tracing::info;

use crate::cluster::ClusterFile;
use crate::output::{print_output, DecisionRow};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Cluster description file (TOML).
    #[arg(long)]
    cluster: PathBuf,
}

pub fn run(ctx: CommandContext, args: PlanArgs) -> Result<()> {
    let cluster = ClusterFile::load(&args.cluster)?;
    let rows = plan_rows(&ctx, &cluster);

    let blocked = rows.iter().filter(|r| !r.is_admitted()).count();
    info!(
        workers = cluster.workers.len(),
        items = cluster.items.len(),
        blocked,
        "Planned cluster"
    );

    print_output(&rows, ctx.format);
    Ok(())
}

fn plan_rows(ctx: &CommandContext, cluster: &ClusterFile) -> Vec<DecisionRow> {
    let registry = match cluster.exclusive_labels.as_deref() {
        Some(source) => ExclusiveRegistry::parse(source),
        None => ctx.config.registry(),
    };
    let shared = SharedRegistry::new(registry);
    let gate = ExclusiveLabelGate::new().options(ctx.config.gate_options());
    let dispatcher = ExclusiveLabelDispatcher::from_shared(gate, &shared);

    let mut rows = Vec::new();
    for (index, item) in cluster.items.iter().enumerate() {
        let item_name = item
            .name
            .clone()
            .unwrap_or_else(|| format!("item-{}", index + 1));
        let result = filter_workers(&dispatcher, &cluster.workers, item);

        for (worker, decision) in cluster.workers.iter().zip(&result.decisions) {
            rows.push(DecisionRow::new(&item_name, &worker.name, decision));
        }
    }
    rows
}
