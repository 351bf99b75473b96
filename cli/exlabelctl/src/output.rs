//! Output formatting for CLI commands.

use colored::Colorize;
use exlabel_admission::Decision;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// One admission decision, as printed.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DecisionRow {
    #[tabled(rename = "Item")]
    pub item: String,

    #[tabled(rename = "Worker")]
    pub worker: String,

    #[tabled(rename = "Decision")]
    pub decision: String,

    #[tabled(rename = "Reason")]
    pub reason: String,
}

impl DecisionRow {
    pub fn new(item: &str, worker: &str, decision: &Decision) -> Self {
        let (verdict, reason) = match decision.blockage() {
            None => ("admit", "-".to_string()),
            Some(blockage) => ("reject", blockage.short_description()),
        };
        Self {
            item: item.to_string(),
            worker: worker.to_string(),
            decision: verdict.to_string(),
            reason,
        }
    }

    pub fn is_admitted(&self) -> bool {
        self.decision == "admit"
    }
}

/// Print data in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

/// Print a single item as JSON.
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

/// Print one decision for a human.
pub fn print_decision(row: &DecisionRow) {
    if row.is_admitted() {
        println!("{} {}", "Admit:".green().bold(), row.worker);
    } else {
        println!("{} {}", "Reject:".red().bold(), row.reason);
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

#[cfg(test)]
mod tests {
    use exlabel_admission::Blockage;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::admit(Decision::Admit, "admit", "-")]
    #[case::reject(
        Decision::Reject(Blockage::not_exclusive_label("w1")),
        "reject",
        "Node w1 has exclusive label(s)"
    )]
    fn test_decision_row(
        #[case] decision: Decision,
        #[case] verdict: &str,
        #[case] reason: &str,
    ) {
        let row = DecisionRow::new("build", "w1", &decision);
        assert_eq!(row.decision, verdict);
        assert_eq!(row.reason, reason);
        assert_eq!(row.is_admitted(), decision.is_admitted());
    }

    #[test]
    fn test_rows_serialize_as_json_array() {
        let rows = vec![DecisionRow::new("build", "w1", &Decision::Admit)];
        let json: serde_json::Value = serde_json::from_str(&format_json(&rows, "[]")).unwrap();
        assert_eq!(json[0]["worker"], "w1");
        assert_eq!(json[0]["decision"], "admit");
    }
}
