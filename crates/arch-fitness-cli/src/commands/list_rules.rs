//! List rules command implementation.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use arch_fitness_core::{CheckBox, RuleRegistry};
use arch_fitness_rules::all_checks;

use crate::config_resolver::ConfigSource;

/// Prints the registry assembled for `path` and every available check.
pub fn run(path: &Path, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let policy = super::policy(path, &config)?;
    print!("{}", render(policy.registry(), &all_checks()));
    Ok(())
}

fn render(registry: &RuleRegistry, checks: &[CheckBox]) -> String {
    let mut out = String::from("Dependency rules:\n\n");
    let _ = writeln!(out, "{:<50} {:<20} {:<8} Comment", "Name", "Category", "Severity");
    let _ = writeln!(out, "{}", "-".repeat(100));
    for entry in registry.entries() {
        let rule = &entry.rule;
        let _ = writeln!(
            out,
            "{:<50} {:<20} {:<8} {}",
            rule.name(),
            entry.category,
            rule.severity().to_string(),
            rule.comment()
        );
    }

    let _ = writeln!(out, "\nChecks:\n");
    for check in checks {
        let _ = writeln!(out, "  {:<28} {}", check.name(), check.description());
    }

    out.push_str("\nOverride a rule in arch-fitness.toml:\n");
    out.push_str("  [rules.no-orphans]\n  enabled = false\n");
    out.push_str("\nRun a subset of checks:\n");
    out.push_str("  arch-fitness check --only dependency-rules,no-types-folder\n");
    out
}
