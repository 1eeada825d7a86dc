//! Forbids generic `.type.` files in the domain layer.

use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};

use super::domain_sources;

/// Check name.
pub const NAME: &str = "no-generic-type-files";

/// Flags `*.type.*` sources under domain directories, spec files excepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGenericTypeFiles;

impl Check for NoGenericTypeFiles {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Domain files must not use the generic .type. suffix"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        Ok(domain_sources(policy)?
            .into_iter()
            .filter(|f| !f.is_spec() && f.file_name().contains(".type."))
            .map(|f| {
                Violation::new(
                    NAME,
                    Severity::Error,
                    ViolationKind::Filename,
                    Location::file(&f.relative),
                    "Generic .type. file in the domain layer",
                )
                .with_suggestion(Suggestion::new(
                    "Rename to .projection., .param. or .command., or inline the type into its consumer",
                ))
            })
            .collect())
    }
}
