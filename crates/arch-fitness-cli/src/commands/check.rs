//! Check command implementation.

use std::path::Path;

use anyhow::Result;
use arch_fitness_core::{Runner, Severity};
use arch_fitness_rules::all_checks;
use tracing::info;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options for a check run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Report format.
    pub format: OutputFormat,
    /// Run only these checks.
    pub only: Vec<String>,
    /// Skip these checks.
    pub skip: Vec<String>,
    /// Overrides the configured fail threshold.
    pub fail_on: Option<Severity>,
}

/// Runs the selected checks and prints the report.
///
/// Returns whether the run passed.
pub fn run(path: &Path, options: &Options, source: &ConfigSource) -> Result<bool> {
    let mut config = source.load()?;
    if let Some(fail_on) = options.fail_on {
        config.fail_on = Some(fail_on);
    }
    let policy = super::policy(path, &config)?;
    let runner = Runner::new(all_checks()).select(&options.only, &options.skip)?;

    info!(
        "Checking {} with {} check(s), {} rule(s)",
        path.display(),
        runner.check_names().len(),
        policy.registry().len()
    );

    let report = runner.run(&policy);
    super::output::print(&report, options.format)?;

    Ok(report.is_success())
}
