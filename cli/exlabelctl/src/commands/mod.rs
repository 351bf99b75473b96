//! CLI commands.

mod check;
mod config;
mod plan;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{default_path, Config};
use crate::output::OutputFormat;

/// exlabelctl - Check exclusive label admission decisions.
#[derive(Debug, Parser)]
#[command(name = "exlabelctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path (defaults to the platform config directory).
    #[arg(long, global = true, env = "EXLABEL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decide whether one worker may take one item.
    Check(check::CheckArgs),

    /// Decide every (item, worker) pair in a cluster file.
    Plan(plan::PlanArgs),

    /// Inspect or replace the exclusive label configuration.
    Config(config::ConfigCommand),
}

/// Shared state handed to every command.
pub struct CommandContext {
    pub config_path: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => default_path()?,
        };
        let config = Config::load_from(&config_path)?.with_env_overrides();

        init_tracing(&config.log_level, self.log_json);
        debug!(config_path = %config_path.display(), "Configuration loaded");

        let ctx = CommandContext {
            config_path,
            config,
            format: self.format,
        };

        match self.command {
            Commands::Check(args) => check::run(ctx, args),
            Commands::Plan(args) => plan::run(ctx, args),
            Commands::Config(cmd) => cmd.run(ctx),
        }
    }
}

/// Initialize tracing (prefer RUST_LOG, fallback to the configured level).
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
