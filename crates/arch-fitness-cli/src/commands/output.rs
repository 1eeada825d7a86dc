//! Report rendering.

use std::fmt::Write;

use anyhow::Result;
use arch_fitness_core::{CheckOutcome, RunReport, Severity};

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Prints the report to stdout in `format`.
///
/// Each check's section is rendered in full before it is written, so output
/// for one check is never interleaved with another's.
pub fn print(report: &RunReport, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
        OutputFormat::Compact => render_compact(report),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for outcome in &report.checks {
        out.push_str(&render_section(outcome, report.fail_on));
    }

    let (errors, warnings, infos) = report.counts();
    let failed = report.failed_checks();
    let color = if !report.is_success() {
        RED
    } else if warnings > 0 || infos > 0 {
        YELLOW
    } else {
        GREEN
    };
    let _ = write!(
        out,
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} check(s)",
        report.checks.len()
    );
    if failed > 0 {
        let _ = write!(out, "; {failed} check(s) failed to run");
    }
    let verdict = if report.is_success() { "PASSED" } else { "FAILED" };
    let _ = writeln!(out, " - {verdict}{RESET}");
    out
}

fn render_section(outcome: &CheckOutcome, fail_on: Severity) -> String {
    let mut out = format!("{BOLD}== {} =={RESET} {}\n", outcome.name, outcome.description);

    if let Some(error) = &outcome.error {
        let _ = writeln!(out, "  {RED}failed to run{RESET}: {error}\n");
        return out;
    }
    if outcome.violations.is_empty() {
        let _ = writeln!(out, "  {GREEN}ok{RESET}\n");
        return out;
    }

    for violation in &outcome.violations {
        let label = match violation.severity {
            Severity::Error => format!("{RED}error{RESET}"),
            Severity::Warn => format!("{YELLOW}warn{RESET}"),
            Severity::Info => format!("{BLUE}info{RESET}"),
        };
        // Swap the plain severity in the second line for a colored one.
        let block = violation
            .format()
            .replacen(&format!("  {}: ", violation.severity), &format!("  {label}: "), 1);
        let _ = writeln!(out, "{block}");
    }
    let status = if outcome.passed(fail_on) { "passed" } else { "failed" };
    let _ = writeln!(out, "  {} violation(s), {status}\n", outcome.violations.len());
    out
}

fn render_compact(report: &RunReport) -> String {
    let mut out = String::new();
    for outcome in &report.checks {
        if let Some(error) = &outcome.error {
            let _ = writeln!(out, "{}: failed to run: {error}", outcome.name);
        }
        for violation in &outcome.violations {
            let _ = writeln!(out, "{violation}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_fitness_core::{Location, Suggestion, Violation, ViolationKind};

    fn report() -> RunReport {
        RunReport {
            fail_on: Severity::Info,
            checks: vec![
                CheckOutcome {
                    name: "dependency-rules".to_string(),
                    description: "Forbidden dependencies".to_string(),
                    violations: vec![Violation::dependency(
                        "domain-module-boundary",
                        Severity::Error,
                        "src/notes/domain/a.service.ts",
                        "src/tags/domain/tag.service.ts",
                        "Cross-module import",
                    )
                    .with_suggestion(Suggestion::new("Import the tags aggregator instead"))],
                    error: None,
                },
                CheckOutcome {
                    name: "no-types-folder".to_string(),
                    description: "No types folders".to_string(),
                    violations: vec![Violation::new(
                        "no-types-folder",
                        Severity::Error,
                        ViolationKind::CentralizedFolder { file_count: 2 },
                        Location::file("src/notes/domain/types"),
                        "Centralized types folder with 2 file(s)",
                    )],
                    error: None,
                },
                CheckOutcome {
                    name: "dto-colocation".to_string(),
                    description: "DTOs beside actions".to_string(),
                    violations: Vec::new(),
                    error: Some("failed to walk src/notes/apps: permission denied".to_string()),
                },
            ],
        }
    }

    #[test]
    fn compact_is_one_line_per_finding() {
        insta::assert_snapshot!(render_compact(&report()), @r"
        src/notes/domain/a.service.ts -> src/tags/domain/tag.service.ts: error [domain-module-boundary] Cross-module import
        src/notes/domain/types: error [no-types-folder] Centralized types folder with 2 file(s)
        dto-colocation: failed to run: failed to walk src/notes/apps: permission denied
        ");
    }

    #[test]
    fn text_groups_by_check_and_summarizes() {
        let text = render_text(&report());
        let first = text.find("== dependency-rules ==").unwrap();
        let second = text.find("== no-types-folder ==").unwrap();
        assert!(first < second);
        assert!(text.contains("= help: Import the tags aggregator instead"));
        assert!(text.contains("failed to run"));
        assert!(text.contains("Found 2 error(s), 0 warning(s), 0 info(s) in 3 check(s); 1 check(s) failed to run - FAILED"));
    }

    #[test]
    fn clean_section_says_ok() {
        let outcome = CheckOutcome {
            name: "param-colocation".to_string(),
            description: "Params beside consumers".to_string(),
            violations: Vec::new(),
            error: None,
        };
        assert!(render_section(&outcome, Severity::Info).contains("ok"));
    }

    #[test]
    fn json_is_the_serialized_report() {
        let json: serde_json::Value = serde_json::to_value(report()).unwrap();
        assert_eq!(json["fail_on"], "info");
        let folder = &json["checks"][1]["violations"][0];
        assert_eq!(folder["kind"], "centralizedFolder");
        assert_eq!(folder["fileCount"], 2);
        assert_eq!(json["checks"][2]["error"], "failed to walk src/notes/apps: permission denied");
    }
}
