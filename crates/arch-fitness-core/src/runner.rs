//! Runs checks independently and collects their outcomes.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::check::CheckBox;
use crate::policy::{Policy, PolicyError};
use crate::types::{count_by_severity, Severity, Violation};

/// Result of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Check name.
    pub name: String,
    /// Check description.
    pub description: String,
    /// Violations found (empty when the check failed).
    pub violations: Vec<Violation>,
    /// Execution error, if the check could not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutcome {
    /// Whether the check completed and has no violations at or above
    /// `fail_on`.
    #[must_use]
    pub fn passed(&self, fail_on: Severity) -> bool {
        self.error.is_none() && !self.violations.iter().any(|v| v.severity >= fail_on)
    }
}

/// Outcomes of a whole run, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Failure threshold the run was judged against.
    pub fail_on: Severity,
    /// One entry per executed check.
    pub checks: Vec<CheckOutcome>,
}

impl RunReport {
    /// Whether every check passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.checks.iter().all(|c| c.passed(self.fail_on))
    }

    /// All violations across checks.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.checks.iter().flat_map(|c| c.violations.iter())
    }

    /// Number of checks that failed to execute.
    #[must_use]
    pub fn failed_checks(&self) -> usize {
        self.checks.iter().filter(|c| c.error.is_some()).count()
    }

    /// Counts violations as `(errors, warnings, infos)`.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let all: Vec<Violation> = self.violations().cloned().collect();
        count_by_severity(&all)
    }
}

/// Executes a list of checks against a policy.
pub struct Runner {
    checks: Vec<CheckBox>,
}

impl Runner {
    /// Creates a runner.
    #[must_use]
    pub fn new(checks: Vec<CheckBox>) -> Self {
        Self { checks }
    }

    /// Names of the registered checks.
    #[must_use]
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Restricts the run to `only` (when non-empty) minus `skip`.
    ///
    /// # Errors
    ///
    /// Returns error if a name matches no registered check.
    pub fn select(mut self, only: &[String], skip: &[String]) -> Result<Self, PolicyError> {
        let names = self.check_names();
        if let Some(unknown) = only.iter().chain(skip).find(|n| !names.iter().any(|k| *k == n.as_str())) {
            return Err(PolicyError::UnknownCheck {
                name: unknown.clone(),
                available: names.join(", "),
            });
        }
        self.checks.retain(|c| {
            let name = c.name();
            (only.is_empty() || only.iter().any(|o| o == name)) && !skip.iter().any(|s| s == name)
        });
        Ok(self)
    }

    /// Runs every check. A failing check is recorded and does not stop the
    /// others.
    #[must_use]
    pub fn run(&self, policy: &Policy) -> RunReport {
        let mut checks = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let name = check.name();
            debug!(check = name, "Running check");
            let outcome = match check.run(policy) {
                Ok(violations) => {
                    debug!(check = name, violations = violations.len(), "Check completed");
                    CheckOutcome {
                        name: name.to_string(),
                        description: check.description().to_string(),
                        violations,
                        error: None,
                    }
                }
                Err(e) => {
                    warn!(check = name, error = %e, "Check failed");
                    CheckOutcome {
                        name: name.to_string(),
                        description: check.description().to_string(),
                        violations: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };
            checks.push(outcome);
        }

        let report = RunReport {
            fail_on: policy.fail_on(),
            checks,
        };
        let (errors, warnings, infos) = report.counts();
        info!(
            "Run complete: {} checks, {} errors, {} warnings, {} info, {} failed",
            report.checks.len(),
            errors,
            warnings,
            infos,
            report.failed_checks()
        );
        report
    }
}
