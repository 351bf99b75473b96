//! Exclusive label configuration commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use exlabel_admission::LabelAtom;
use serde::Serialize;

use crate::config::Config;
use crate::output::{print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Configuration commands.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the current configuration and the parsed exclusive labels.
    Show,

    /// Replace the exclusive label string.
    SetLabels(SetLabelsArgs),

    /// Print the config file path.
    Path,
}

#[derive(Debug, Args)]
struct SetLabelsArgs {
    /// New space-separated label string (replaces the old one entirely).
    #[arg(required_unless_present = "clear")]
    labels: Option<String>,

    /// Remove the exclusive label string.
    #[arg(long, conflicts_with = "labels")]
    clear: bool,

    /// Also reject requirements that do not name the worker's exclusive label.
    #[arg(long)]
    require_name_mention: Option<bool>,
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::SetLabels(args) => set_labels(ctx, args),
            ConfigSubcommand::Path => {
                println!("{}", ctx.config_path.display());
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    path: String,
    exclusive_labels: Option<&'a str>,
    labels: Vec<&'a str>,
    require_name_mention: bool,
    log_level: &'a str,
}

fn show(ctx: CommandContext) -> Result<()> {
    let registry = ctx.config.registry();
    let view = ConfigView {
        path: ctx.config_path.display().to_string(),
        exclusive_labels: ctx.config.exclusive_labels.as_deref(),
        labels: registry.labels().iter().map(LabelAtom::name).collect(),
        require_name_mention: ctx.config.require_name_mention,
        log_level: &ctx.config.log_level,
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            print_info(&format!("config file: {}", view.path));
            println!(
                "exclusive_labels     = {}",
                view.exclusive_labels.map(|s| format!("{s:?}")).unwrap_or_else(|| "(unset)".to_string())
            );
            println!("labels               = [{}]", view.labels.join(", "));
            println!("require_name_mention = {}", view.require_name_mention);
            println!("log_level            = {}", view.log_level);
        }
    }
    Ok(())
}

fn set_labels(ctx: CommandContext, args: SetLabelsArgs) -> Result<()> {
    // Environment overrides must not leak into the saved file.
    let mut config = Config::load_from(&ctx.config_path)?;
    config.exclusive_labels = if args.clear { None } else { args.labels };
    if let Some(require) = args.require_name_mention {
        config.require_name_mention = require;
    }
    config.save_to(&ctx.config_path)?;

    let count = config.registry().len();
    print_success(&format!(
        "Saved {} exclusive label(s) to {}",
        count,
        ctx.config_path.display()
    ));
    Ok(())
}
