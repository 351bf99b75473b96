//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        match config_err {
            ConfigError::NoConfigDir => {
                eprintln!(
                    "\n{}",
                    "Hint: Pass --config <PATH> to choose a config file explicitly.".yellow()
                );
            }
            ConfigError::Parse { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `exlabelctl config set-labels <LABELS>` to rewrite the file.".yellow()
                );
            }
            _ => {}
        }
    }

    if let Some(label_err) = err.downcast_ref::<exlabel_labels::LabelError>() {
        if let Some(offset) = label_err.offset() {
            eprintln!("\n{}", format!("Hint: check the expression near byte {offset}.").yellow());
        }
    }
}
