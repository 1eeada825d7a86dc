//! Forbids centralized `types` folders in the domain layer.

use arch_fitness_core::layout;
use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};

use super::{layer_dirs, relative};

/// Check name.
pub const NAME: &str = "no-types-folder";

/// Flags any `types` directory below a domain directory that holds at least
/// one source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypesFolder;

impl Check for NoTypesFolder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Domain type definitions must live beside their consumer, not in a types folder"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        let mut violations = Vec::new();
        for domain in layer_dirs(policy, layout::DOMAIN_DIR)? {
            let folders = layout::dirs_named(&domain, "types").map_err(|e| CheckError::walk(&domain, e))?;
            for folder in folders {
                let file_count = layout::files_under(&folder)
                    .map_err(|e| CheckError::walk(&folder, e))?
                    .iter()
                    .filter(|p| {
                        p.file_name()
                            .is_some_and(|n| policy.scan().is_source_file(&n.to_string_lossy()))
                    })
                    .count();
                if file_count == 0 {
                    continue;
                }
                violations.push(
                    Violation::new(
                        NAME,
                        Severity::Error,
                        ViolationKind::CentralizedFolder { file_count },
                        Location::file(relative(policy, &folder)),
                        format!("Centralized types folder with {file_count} file(s)"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Move each type next to the single file that uses it",
                    )),
                );
            }
        }
        Ok(violations)
    }
}
