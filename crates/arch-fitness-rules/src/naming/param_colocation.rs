//! Requires `.param.`, `.command.` and `.projection.` files to sit beside the
//! component that consumes them.
//!
//! # Rationale
//!
//! Such a type exists for one transaction script, service or aggregator.
//! If no such file shares its directory, the type has drifted away from its
//! consumer or outlived it.

use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};
use std::collections::HashMap;

use super::{domain_sources, LayerFile};

/// Check name.
pub const NAME: &str = "param-colocation";

/// Infixes of files that must be colocated.
const COLOCATED_INFIXES: &[&str] = &[".param.", ".command.", ".projection."];

const CONSUMER_SUFFIXES: &[&str] = &[".transaction-script", ".service", ".aggregator"];

/// Flags param, command and projection files with no consumer in the same
/// directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamColocation;

fn is_consumer(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, _)| CONSUMER_SUFFIXES.iter().any(|s| stem.ends_with(s)))
}

fn must_be_colocated(file_name: &str) -> bool {
    COLOCATED_INFIXES.iter().any(|infix| file_name.contains(infix))
}

fn directory(file: &LayerFile) -> &str {
    file.relative.rsplit_once('/').map_or("", |(dir, _)| dir)
}

impl Check for ParamColocation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Param, command and projection files must share a directory with their consumer"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        let sources: Vec<LayerFile> = domain_sources(policy)?.into_iter().filter(|f| !f.is_spec()).collect();

        let mut has_consumer: HashMap<&str, bool> = HashMap::new();
        for file in &sources {
            let entry = has_consumer.entry(directory(file)).or_insert(false);
            *entry |= is_consumer(file.file_name());
        }

        Ok(sources
            .iter()
            .filter(|f| must_be_colocated(f.file_name()))
            .filter(|f| !has_consumer.get(directory(f)).copied().unwrap_or(false))
            .map(|f| {
                Violation::new(
                    NAME,
                    Severity::Error,
                    ViolationKind::OrphanedFile,
                    Location::file(&f.relative),
                    "No transaction script, service or aggregator beside this file",
                )
                .with_suggestion(Suggestion::new(
                    "Move it next to the file that consumes it, or delete it if unused",
                ))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::test_support::{files, run, write};
    use tempfile::TempDir;

    #[test]
    fn consumer_suffixes() {
        assert!(is_consumer("create-note.transaction-script.ts"));
        assert!(is_consumer("note.service.ts"));
        assert!(is_consumer("note.aggregator.ts"));
        assert!(!is_consumer("notes.app-service.ts"));
        assert!(!is_consumer("note.repository.ts"));
    }

    #[test]
    fn param_beside_consumer_is_fine() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/notes/domain/create/create-note.param.ts", "");
        write(tmp.path(), "src/notes/domain/create/create-note.transaction-script.ts", "");
        assert!(run(&ParamColocation, &tmp).is_empty());
    }

    #[test]
    fn param_without_consumer_is_flagged() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/notes/domain/params/create-note.param.ts", "");
        write(tmp.path(), "src/notes/domain/create-note.transaction-script.ts", "");
        let v = run(&ParamColocation, &tmp);
        assert_eq!(files(&v), vec!["src/notes/domain/params/create-note.param.ts"]);
        assert_eq!(v[0].kind, ViolationKind::OrphanedFile);
    }

    #[test]
    fn commands_and_projections_need_consumers_too() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/notes/domain/shared/archive-note.command.ts", "");
        write(tmp.path(), "src/notes/domain/shared/note-summary.projection.ts", "");
        write(tmp.path(), "src/notes/domain/list/note-list.projection.ts", "");
        write(tmp.path(), "src/notes/domain/list/list-notes.service.ts", "");
        let v = run(&ParamColocation, &tmp);
        assert_eq!(
            files(&v),
            vec![
                "src/notes/domain/shared/archive-note.command.ts",
                "src/notes/domain/shared/note-summary.projection.ts",
            ]
        );
    }
}
