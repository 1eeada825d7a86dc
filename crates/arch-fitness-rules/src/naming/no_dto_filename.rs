//! Forbids "dto" in file names under domain directories.
//!
//! # Rationale
//!
//! DTOs are transport shapes owned by the application layer. A domain file
//! named `*dto*` is either misplaced or misnamed.

use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};

use super::domain_files;

/// Check name.
pub const NAME: &str = "no-dto-filename-in-domain";

/// Flags domain files whose name contains `dto` (case-insensitive).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDtoFilenameInDomain;

impl Check for NoDtoFilenameInDomain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Domain file names must not contain \"dto\""
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        Ok(domain_files(policy)?
            .into_iter()
            .filter(|f| f.file_name().to_ascii_lowercase().contains("dto"))
            .map(|f| {
                Violation::new(
                    NAME,
                    Severity::Error,
                    ViolationKind::Filename,
                    Location::file(&f.relative),
                    "File name contains \"dto\" inside the domain layer",
                )
                .with_suggestion(Suggestion::new(
                    "Name domain types after what they model; keep DTOs in the apps layer",
                ))
            })
            .collect())
    }
}
