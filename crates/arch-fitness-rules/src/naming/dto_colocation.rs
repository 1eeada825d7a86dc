//! Forbids centralized DTO and swagger folders under `actions` directories.
//!
//! # Rationale
//!
//! Every action keeps its request/response DTOs and API descriptors in its
//! own folder. Shared `dtos/` or `swagger/` folders couple unrelated actions.
//!
//! # Detected folders
//!
//! Relative to each `actions` directory below an apps directory:
//! `dtos/requests`, `dtos/responses`, `dtos/shared`, `dtos` (direct files
//! only) and `swagger`.

use std::path::Path;

use arch_fitness_core::layout;
use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};

use super::{layer_dirs, relative};

/// Check name.
pub const NAME: &str = "dto-colocation";

/// Folder, relative to an actions directory, and whether its files are
/// counted recursively.
const CENTRALIZED: &[(&str, bool)] = &[
    ("dtos/requests", true),
    ("dtos/responses", true),
    ("dtos/shared", true),
    ("dtos", false),
    ("swagger", true),
];

/// Flags centralized DTO/swagger folders, with their file counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtoColocation;

impl Check for DtoColocation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Action DTOs and swagger descriptors must live beside their action"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        let mut violations = Vec::new();
        for apps in layer_dirs(policy, layout::APPS_DIR)? {
            let actions_dirs = layout::dirs_named(&apps, "actions").map_err(|e| CheckError::walk(&apps, e))?;
            for actions in actions_dirs {
                for (folder, recursive) in CENTRALIZED {
                    let dir = actions.join(folder);
                    if !dir.is_dir() {
                        continue;
                    }
                    let file_count = count_files(&dir, *recursive)?;
                    if file_count == 0 {
                        continue;
                    }
                    violations.push(
                        Violation::new(
                            NAME,
                            Severity::Error,
                            ViolationKind::CentralizedFolder { file_count },
                            Location::file(relative(policy, &dir)),
                            format!("Centralized {folder} folder with {file_count} file(s)"),
                        )
                        .with_suggestion(Suggestion::new(
                            "Move each file into the folder of the action that uses it",
                        )),
                    );
                }
            }
        }
        Ok(violations)
    }
}

fn count_files(dir: &Path, recursive: bool) -> Result<usize, CheckError> {
    let files = if recursive {
        layout::files_under(dir)
    } else {
        layout::direct_files(dir)
    };
    files.map(|f| f.len()).map_err(|e| CheckError::walk(dir, e))
}
