//! exlabelctl - exclusive label admission CLI
//!
//! Checks whether workers may take pending items when some worker labels
//! are configured as exclusive, and manages that configuration.

use clap::Parser;

mod cluster;
mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        // Print error in a user-friendly way
        error::print_error(&e);
        std::process::exit(1);
    }
}
