//! Report rendering.
//!
//! Pure presentation over an aggregated [`PlanSummary`]: the same tallies
//! render as plain text, Markdown, or a JSON document. Nothing here logs or
//! performs I/O; the caller decides where the report goes.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::plan::{Action, ActionKey, Plan};

use super::aggregate::{GroupedTally, PlanSummary};

/// Horizontal rule used by the text report.
const RULE: &str = "============================================================";

/// Output format options for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable text report.
    #[default]
    Text,
    /// Markdown report with pipe-delimited tables.
    Markdown,
    /// Structured JSON document for scripting.
    Json,
}

/// Summarizes a plan in one call: classify, aggregate, render.
///
/// The returned string is the complete report; repeated invocation over the
/// same plan yields byte-identical output.
#[must_use]
pub fn summarize(plan: &Plan, detailed: bool, format: SummaryFormat) -> String {
    let summary = PlanSummary::from_plan(plan);
    render(&summary, detailed, format)
}

/// Renders an already-aggregated summary.
#[must_use]
pub fn render(summary: &PlanSummary, detailed: bool, format: SummaryFormat) -> String {
    match format {
        SummaryFormat::Text => render_text(summary, detailed),
        SummaryFormat::Markdown => render_markdown(summary, detailed),
        SummaryFormat::Json => render_json(summary),
    }
}

/// Returns the glyph-free label for an action key.
///
/// The six known combinations map to fixed labels; anything else renders as
/// a literal comma join of its tokens behind the fallback glyph.
#[must_use]
pub fn action_label(key: &ActionKey) -> String {
    match key.tokens() {
        [Action::Create] => String::from("create"),
        [Action::Update] => String::from("update"),
        [Action::Delete] => String::from("delete"),
        [Action::Create, Action::Delete] | [Action::Delete, Action::Create] => {
            String::from("replace")
        }
        [Action::NoOp] => String::from("no-op"),
        [Action::Read] => String::from("read"),
        tokens => tokens
            .iter()
            .map(Action::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Returns the decorative prefix glyph for an action key.
///
/// Used only by the text report; table cells render the bare label.
#[must_use]
pub fn action_glyph(key: &ActionKey) -> &'static str {
    match key.tokens() {
        [Action::Create] => "+",
        [Action::Update] => "~",
        [Action::Delete] => "-",
        [Action::Create, Action::Delete] | [Action::Delete, Action::Create] => "±",
        [Action::NoOp] => "·",
        [Action::Read] => ">",
        _ => "?",
    }
}

/// Renders the plain-text report.
fn render_text(summary: &PlanSummary, detailed: bool) -> String {
    let total = summary.total_changes();
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "TERRAFORM PLAN SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total changes: {total} resources");
    let _ = writeln!(out);

    if total == 0 {
        let _ = writeln!(out, "No changes detected.");
        return out;
    }

    let _ = writeln!(out, "OVERALL CHANGES:");
    for (key, count) in summary.overall_sorted() {
        let _ = writeln!(
            out,
            "  {} {}: {count} resources",
            action_glyph(key),
            action_label(key)
        );
    }

    if detailed {
        let _ = writeln!(out);
        let _ = writeln!(out, "BY SERVICE:");
        for group in summary.services() {
            let _ = writeln!(out, "  {}: {} total", group.name.to_uppercase(), group.total);
            for &(key, count) in &group.rows {
                let _ = writeln!(
                    out,
                    "    └─ {} {}: {count}",
                    action_glyph(key),
                    action_label(key)
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "BY MODULE:");
        for group in summary.modules() {
            let _ = writeln!(out, "  {}: {} total", group.name, group.total);
            for &(key, count) in &group.rows {
                let _ = writeln!(
                    out,
                    "    └─ {} {}: {count}",
                    action_glyph(key),
                    action_label(key)
                );
            }
        }
    }

    out
}

/// Renders the Markdown report.
fn render_markdown(summary: &PlanSummary, detailed: bool) -> String {
    let total = summary.total_changes();
    let mut out = String::new();

    let _ = writeln!(out, "# Terraform Plan Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Total changes:** {total} resources");
    let _ = writeln!(out);

    if total == 0 {
        let _ = writeln!(out, "**No changes detected.**");
        return out;
    }

    let _ = writeln!(out, "## Overall Changes");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Action | Count |");
    let _ = writeln!(out, "|--------|-------|");
    for (key, count) in summary.overall_sorted() {
        let _ = writeln!(out, "| {} | {count} |", action_label(key));
    }

    if detailed {
        let _ = writeln!(out);
        let _ = writeln!(out, "## By Service");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Service | Total | Details |");
        let _ = writeln!(out, "|---------|-------|---------|");
        for group in summary.services() {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                group.name.to_uppercase(),
                group.total,
                row_details(&group)
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "## By Module");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Module | Total | Details |");
        let _ = writeln!(out, "|--------|-------|---------|");
        for group in summary.modules() {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                group.name,
                group.total,
                row_details(&group)
            );
        }
    }

    out
}

/// Formats a group's action rows as a "label: count" list for table cells.
fn row_details(group: &GroupedTally<'_>) -> String {
    group
        .rows
        .iter()
        .map(|&(key, count)| format!("{}: {count}", action_label(key)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON document shape for the structured report.
#[derive(Serialize)]
struct ReportJson {
    total_changes: u64,
    summary: BTreeMap<String, u64>,
    by_service: BTreeMap<String, GroupJson>,
    by_module: BTreeMap<String, GroupJson>,
}

/// Per-service or per-module entry in the JSON report.
#[derive(Serialize)]
struct GroupJson {
    total: u64,
    details: BTreeMap<String, u64>,
}

/// Renders the JSON report.
///
/// Action keys are encoded as canonical underscore-joined strings,
/// independent of the display ordering used by the other formats. An empty
/// plan still produces the full zero-valued structure.
fn render_json(summary: &PlanSummary) -> String {
    let doc = ReportJson {
        total_changes: summary.total_changes(),
        summary: summary
            .by_action()
            .iter()
            .map(|(key, count)| (key.canonical(), *count))
            .collect(),
        by_service: groups_json(summary.services()),
        by_module: groups_json(summary.modules()),
    };

    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

/// Converts grouped tallies into the JSON entry map.
fn groups_json(groups: Vec<GroupedTally<'_>>) -> BTreeMap<String, GroupJson> {
    groups
        .into_iter()
        .map(|group| {
            let details = group
                .rows
                .iter()
                .map(|&(key, count)| (key.canonical(), count))
                .collect();
            (
                group.name.to_string(),
                GroupJson {
                    total: group.total,
                    details,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Change, ResourceChange};

    fn change(resource_type: &str, module: Option<&str>, actions: &[Action]) -> ResourceChange {
        ResourceChange {
            resource_type: resource_type.to_string(),
            module_address: module.map(String::from),
            change: Change {
                actions: actions.to_vec(),
            },
        }
    }

    fn sample_plan() -> Plan {
        Plan::new(vec![
            change("aws_instance", Some("module.network"), &[Action::Create]),
            change("aws_subnet", Some("module.network"), &[Action::Create]),
            change("aws_s3_bucket", None, &[Action::Create, Action::Delete]),
            change("custom_widget", None, &[Action::Update]),
        ])
    }

    #[test]
    fn test_labels_for_known_keys() {
        assert_eq!(action_label(&ActionKey::new(vec![Action::Create])), "create");
        assert_eq!(action_label(&ActionKey::new(vec![Action::NoOp])), "no-op");
        assert_eq!(action_label(&ActionKey::new(vec![Action::Read])), "read");
        assert_eq!(
            action_label(&ActionKey::new(vec![Action::Create, Action::Delete])),
            "replace"
        );
        assert_eq!(
            action_label(&ActionKey::new(vec![Action::Delete, Action::Create])),
            "replace"
        );
    }

    #[test]
    fn test_fallback_label_for_unknown_combinations() {
        let key = ActionKey::new(vec![Action::Create, Action::Update, Action::Delete]);
        assert_eq!(action_label(&key), "create, update, delete");
        assert_eq!(action_glyph(&key), "?");

        let key = ActionKey::new(vec![Action::Other(String::from("forget"))]);
        assert_eq!(action_label(&key), "forget");
        assert_eq!(action_glyph(&key), "?");
    }

    #[test]
    fn test_text_report_sections() {
        let report = summarize(&sample_plan(), true, SummaryFormat::Text);

        assert!(report.contains("TERRAFORM PLAN SUMMARY"));
        assert!(report.contains("Total changes: 4 resources"));
        assert!(report.contains("OVERALL CHANGES:"));
        assert!(report.contains("  + create: 2 resources"));
        assert!(report.contains("  ± replace: 1 resources"));
        assert!(report.contains("BY SERVICE:"));
        assert!(report.contains("  EC2: 1 total"));
        assert!(report.contains("  OTHER: 1 total"));
        assert!(report.contains("BY MODULE:"));
        assert!(report.contains("  module.network: 2 total"));
        assert!(report.contains("  root: 2 total"));
    }

    #[test]
    fn test_text_report_without_details() {
        let report = summarize(&sample_plan(), false, SummaryFormat::Text);

        assert!(report.contains("OVERALL CHANGES:"));
        assert!(!report.contains("BY SERVICE:"));
        assert!(!report.contains("BY MODULE:"));
    }

    #[test]
    fn test_empty_plan_text_and_markdown() {
        let plan = Plan::default();

        let text = summarize(&plan, true, SummaryFormat::Text);
        assert!(text.contains("Total changes: 0 resources"));
        assert!(text.contains("No changes detected."));
        assert!(!text.contains("OVERALL CHANGES:"));
        assert!(!text.contains("BY SERVICE:"));

        let markdown = summarize(&plan, true, SummaryFormat::Markdown);
        assert!(markdown.contains("**No changes detected.**"));
        assert!(!markdown.contains("## Overall Changes"));
    }

    #[test]
    fn test_markdown_cells_are_glyph_free() {
        let report = summarize(&sample_plan(), true, SummaryFormat::Markdown);

        assert!(report.contains("| create | 2 |"));
        assert!(report.contains("| replace | 1 |"));
        assert!(!report.contains('±'));
        assert!(report.contains("| S3 | 1 | replace: 1 |"));
        assert!(report.contains("| VPC | 1 | create: 1 |"));
        assert!(report.contains("| module.network | 2 | create: 2 |"));
    }

    #[test]
    fn test_json_report_structure() {
        let report = summarize(&sample_plan(), true, SummaryFormat::Json);
        let doc: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(doc["total_changes"], 4);
        assert_eq!(doc["summary"]["create"], 2);
        assert_eq!(doc["summary"]["create_delete"], 1);
        assert_eq!(doc["by_service"]["ec2"]["total"], 1);
        assert_eq!(doc["by_service"]["other"]["details"]["update"], 1);
        assert_eq!(doc["by_module"]["module.network"]["total"], 2);
        assert_eq!(doc["by_module"]["root"]["total"], 2);

        // total_changes matches the count derived from summary independently
        let derived: u64 = doc["summary"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(doc["total_changes"].as_u64().unwrap(), derived);
    }

    #[test]
    fn test_json_empty_plan_keeps_full_structure() {
        let report = summarize(&Plan::default(), false, SummaryFormat::Json);
        let doc: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(doc["total_changes"], 0);
        assert!(doc["summary"].as_object().unwrap().is_empty());
        assert!(doc["by_service"].as_object().unwrap().is_empty());
        assert!(doc["by_module"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let plan = sample_plan();
        for format in [
            SummaryFormat::Text,
            SummaryFormat::Markdown,
            SummaryFormat::Json,
        ] {
            let first = summarize(&plan, true, format);
            let second = summarize(&plan, true, format);
            assert_eq!(first, second);
        }
    }
}
