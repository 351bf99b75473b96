//! Cluster description files for `exlabelctl plan`.
//!
//! ```toml
//! exclusive_labels = "gpu"   # optional, overrides the config file
//!
//! [[workers]]
//! name = "gpu-1"
//! labels = ["linux", "gpu"]
//!
//! [[items]]
//! name = "train"
//! requirement = "linux && gpu"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use exlabel_admission::{WorkItem, WorkerSnapshot};
use serde::Deserialize;

/// Workers and pending items to plan against.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterFile {
    /// Overrides the configured exclusive label string.
    #[serde(default)]
    pub exclusive_labels: Option<String>,

    #[serde(default)]
    pub workers: Vec<WorkerSnapshot>,

    #[serde(default)]
    pub items: Vec<WorkItem>,
}

impl ClusterFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cluster file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse cluster file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use exlabel_admission::{LabelAtom, LabelExpr};

    use super::*;

    #[test]
    fn test_parse_cluster() {
        let cluster = ClusterFile::parse(
            r#"
            exclusive_labels = "gpu"

            [[workers]]
            name = "gpu-1"
            labels = ["linux", "gpu"]

            [[workers]]
            name = "bare"

            [[items]]
            name = "train"
            requirement = "linux && gpu"

            [[items]]
            name = "lint"
            "#,
        )
        .unwrap();

        assert_eq!(cluster.exclusive_labels.as_deref(), Some("gpu"));
        assert_eq!(cluster.workers.len(), 2);
        assert!(cluster.workers[0].has_label(&LabelAtom::new("gpu")));
        assert!(cluster.workers[1].labels.is_empty());
        assert_eq!(
            cluster.items[0].requirement(),
            Some(&LabelExpr::and(LabelExpr::atom("linux"), LabelExpr::atom("gpu")))
        );
        assert!(cluster.items[1].requirement().is_none());
    }

    #[test]
    fn test_bad_requirement_is_an_error() {
        let result = ClusterFile::parse(
            r#"
            [[items]]
            requirement = "linux &&"
            "#,
        );
        assert!(result.is_err());
    }
}
