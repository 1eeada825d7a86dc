//! Forbids declaring `*Dto` types in the domain layer.
//!
//! Scans each non-spec source file line by line for a `class`, `interface`
//! or `type` declaration whose identifier ends in `Dto`.

use arch_fitness_core::{Check, CheckError, Location, Policy, Severity, Suggestion, Violation, ViolationKind};
use regex::Regex;

use super::domain_sources;

/// Check name.
pub const NAME: &str = "no-dto-type-in-domain";

const DECLARATION: &str = r"^\s*(?:export\s+)?(?:declare\s+)?(?:default\s+)?(?:abstract\s+)?(?:class|interface|type)\s+([A-Za-z_$][\w$]*Dto)\b";

/// Flags `*Dto` class/interface/type declarations in domain sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDtoTypeInDomain;

/// Returns `(line number, identifier, line text)` for every offending
/// declaration in `source`.
fn declarations<'s>(declaration: &Regex, source: &'s str) -> Vec<(usize, String, &'s str)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            declaration
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| (i + 1, m.as_str().to_string(), line))
        })
        .collect()
}

impl Check for NoDtoTypeInDomain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Domain sources must not declare *Dto types"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        let declaration = Regex::new(DECLARATION)?;
        let mut violations = Vec::new();
        for file in domain_sources(policy)?.into_iter().filter(|f| !f.is_spec()) {
            let bytes = std::fs::read(&file.path).map_err(|e| CheckError::Read {
                path: file.path.clone(),
                source: e,
            })?;
            let source = String::from_utf8_lossy(&bytes);
            for (line, ident, text) in declarations(&declaration, &source) {
                violations.push(
                    Violation::new(
                        NAME,
                        Severity::Error,
                        ViolationKind::Content,
                        Location::line(&file.relative, line),
                        format!("`{ident}` declares a DTO inside the domain layer"),
                    )
                    .with_snippet(text.trim())
                    .with_suggestion(Suggestion::new(
                        "Rename it after the domain concept, or move it to the apps layer",
                    )),
                );
            }
        }
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::test_support::{run, write};
    use tempfile::TempDir;

    #[test]
    fn scan_matches_declarations_only() {
        let declaration = Regex::new(DECLARATION).unwrap();
        let src = "export class NoteDto {}\n\
                   interface TagDto { id: string }\n\
                   export type PageDto<T> = { items: T[] };\n\
                   export abstract class BaseDto {}\n\
                   const noteDto = toDto(note);\n\
                   export class DtoFactory {}\n\
                   // class OldDto\n";
        let found: Vec<(usize, String)> = declarations(&declaration, src)
            .into_iter()
            .map(|(line, ident, _)| (line, ident))
            .collect();
        assert_eq!(
            found,
            vec![
                (1, "NoteDto".to_string()),
                (2, "TagDto".to_string()),
                (3, "PageDto".to_string()),
                (4, "BaseDto".to_string()),
            ]
        );
    }

    #[test]
    fn reports_line_and_snippet() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "src/notes/domain/note.entity.ts",
            "import { x } from './x';\n\n  export class NoteDto {}\n",
        );
        let v = run(&NoDtoTypeInDomain, &tmp);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].location.line, Some(3));
        assert_eq!(v[0].snippet.as_deref(), Some("export class NoteDto {}"));
        assert_eq!(v[0].kind, ViolationKind::Content);
    }

    #[test]
    fn skips_spec_files_and_apps_layer() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/notes/domain/note.spec.ts", "class NoteDto {}\n");
        write(tmp.path(), "src/notes/domain/__specs__/fixtures.ts", "class NoteDto {}\n");
        write(tmp.path(), "src/notes/apps/note.dto.ts", "export class NoteDto {}\n");
        assert!(run(&NoDtoTypeInDomain, &tmp).is_empty());
    }
}
