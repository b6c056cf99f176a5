//! Presentation: organization table, verdict tables and JSON export
//!
//! Consumes finished verdict trees only; nothing here feeds back into the
//! evaluation.

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use serde::Serialize;
use std::path::Path;

use crate::audit::{AuditRun, NetworkFailure};
use crate::config::defaults;
use crate::error::AuditError;
use crate::types::{AuditResult, AuditSummary, NetworkReport, Organization, ThresholdSet};

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn status_cell(passed: bool) -> Cell {
    if passed {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("FAIL").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

/// Numbered table of organizations for the selection prompt.
pub fn organizations_table(organizations: &[Organization]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Organization #", "Org Name"]));
    for (i, org) in organizations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i).fg(Color::Cyan),
            Cell::new(&org.name).fg(Color::Cyan),
        ]);
    }
    table
}

/// One row per rule, grouped by check and entity.
pub fn network_table(report: &NetworkReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(&["Check", "Entity", "Rule", "Observed", "Result"]));

    for (kind, check) in report.checks() {
        if check.is_empty() {
            table.add_row(vec![
                Cell::new(kind),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("no data"),
                status_cell(true),
            ]);
            continue;
        }
        for (entity, verdict) in check.entities() {
            for (rule, outcome) in verdict.rules() {
                let observed = outcome
                    .observed
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                table.add_row(vec![
                    Cell::new(kind),
                    Cell::new(entity),
                    Cell::new(rule),
                    Cell::new(observed),
                    status_cell(outcome.passed),
                ]);
            }
        }
    }
    table
}

/// Print the organization table to stdout.
pub fn print_organizations(organizations: &[Organization]) {
    println!();
    println!("{}", style("Dashboard Organizations").bold().underlined());
    println!("{}", organizations_table(organizations));
}

/// Print every network's verdicts, failures and the summary line.
pub fn print_run(run: &AuditRun) {
    for (name, report) in run.result.networks() {
        println!("{}", "*".repeat(defaults::SEPARATOR_WIDTH));
        let verdict = if report.passed() {
            style("PASS").green().bold()
        } else {
            style("FAIL").red().bold()
        };
        println!("{} {}", style(name).bold().underlined(), verdict);
        println!("{}", network_table(report));
    }
    println!("{}", "*".repeat(defaults::SEPARATOR_WIDTH));

    for failure in &run.failures {
        println!(
            "  {} {}: {}",
            style("!").yellow(),
            style(&failure.network).bold(),
            failure.error
        );
    }

    println!("{}", summary_line(&run.result.summary(), run.failures.len()));
}

/// One-line summary, e.g. `3 networks audited, 1 failed; 2/14 entities failed`.
pub fn summary_line(summary: &AuditSummary, skipped: usize) -> String {
    let mut line = format!(
        "{} networks audited, {} failed; {}/{} entities failed",
        summary.networks, summary.networks_failed, summary.entities_failed, summary.entities
    );
    if skipped > 0 {
        line.push_str(&format!("; {skipped} networks skipped"));
    }
    line
}

// ============================================================================
// JSON Export
// ============================================================================

#[derive(Debug, Serialize)]
struct FailureExport<'a> {
    network: &'a str,
    error: String,
}

impl<'a> From<&'a NetworkFailure> for FailureExport<'a> {
    fn from(f: &'a NetworkFailure) -> Self {
        Self {
            network: &f.network,
            error: f.error.to_string(),
        }
    }
}

/// Document written by `--json`.
#[derive(Debug, Serialize)]
pub struct AuditExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub organization_id: &'a str,
    pub thresholds: &'a ThresholdSet,
    pub summary: AuditSummary,
    pub networks: &'a AuditResult,
    failures: Vec<FailureExport<'a>>,
}

impl<'a> AuditExport<'a> {
    pub fn new(organization_id: &'a str, thresholds: &'a ThresholdSet, run: &'a AuditRun) -> Self {
        Self {
            generated_at: Utc::now(),
            organization_id,
            thresholds,
            summary: run.result.summary(),
            networks: &run.result,
            failures: run.failures.iter().map(FailureExport::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), AuditError> {
        let json = self
            .to_json()
            .map_err(|e| AuditError::Io(std::io::Error::other(e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::channel_utilization;
    use crate::types::{AccessPointUtilizationSample, CheckKind, CheckReport};

    fn sample_run() -> AuditRun {
        let mut report = NetworkReport::new();
        report.insert(
            CheckKind::ChannelUtilization,
            channel_utilization::evaluate(
                &[AccessPointUtilizationSample::new("Q2KD-0001", vec![5.0, 22.0])],
                &ThresholdSet::default(),
            ),
        );
        report.insert(CheckKind::RfProfiles, CheckReport::default());
        AuditRun {
            result: [("HQ", report)].into_iter().collect(),
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_organizations_table_lists_indices() {
        let orgs = vec![
            Organization { id: "O_1".into(), name: "Acme".into() },
            Organization { id: "O_2".into(), name: "Globex".into() },
        ];
        let text = organizations_table(&orgs).to_string();
        assert!(text.contains("Acme"));
        assert!(text.contains("Globex"));
        assert!(text.contains("Org Name"));
    }

    #[test]
    fn test_network_table_shows_failures_and_empty_checks() {
        let run = sample_run();
        let text = network_table(run.result.network("HQ").unwrap()).to_string();
        assert!(text.contains("Q2KD-0001"));
        assert!(text.contains("22.00"));
        assert!(text.contains("FAIL"));
        assert!(text.contains("rf_profiles_check"));
        assert!(text.contains("no data"));
    }

    #[test]
    fn test_summary_line_mentions_skips() {
        let summary = AuditSummary {
            networks: 3,
            networks_failed: 1,
            entities: 14,
            entities_failed: 2,
        };
        assert_eq!(
            summary_line(&summary, 0),
            "3 networks audited, 1 failed; 2/14 entities failed"
        );
        assert!(summary_line(&summary, 2).ends_with("; 2 networks skipped"));
    }

    #[test]
    fn test_export_contains_tree_and_thresholds() {
        let run = sample_run();
        let thresholds = ThresholdSet::default();
        let export = AuditExport::new("O_1", &thresholds, &run);
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();

        assert_eq!(json["organization_id"], "O_1");
        assert_eq!(json["thresholds"]["max_channel_width_mhz"], 40);
        assert_eq!(json["networks"]["HQ"]["channel_utilization_check"]["passed"], false);
        assert_eq!(json["summary"]["entities_failed"], 1);
        assert!(json["failures"].as_array().unwrap().is_empty());
    }
}
