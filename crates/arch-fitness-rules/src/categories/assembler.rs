//! Assemblers build response shapes from domain objects.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{ANY_SERVICE, ASSEMBLER, REPOSITORY};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "assemblers-no-services",
        severity: Severity::Error,
        comment: "Assemblers only reshape data they are given and must not call services",
        from: MatcherTemplate::path(ASSEMBLER),
        to: MatcherTemplate::path(ANY_SERVICE),
    },
    RuleTemplate {
        name: "assemblers-no-repositories",
        severity: Severity::Error,
        comment: "Assemblers only reshape data they are given and must not load it",
        from: MatcherTemplate::path(ASSEMBLER),
        to: MatcherTemplate::path(REPOSITORY),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::fired;

    #[test]
    fn assembler_to_service_or_app_service_is_forbidden() {
        let from = "src/notes/apps/note.assembler.ts";
        assert_eq!(
            fired(RULES, from, "src/notes/domain/note.service.ts"),
            vec!["assemblers-no-services"]
        );
        assert_eq!(
            fired(RULES, from, "src/notes/apps/notes.app-service.ts"),
            vec!["assemblers-no-services"]
        );
    }

    #[test]
    fn assembler_to_repository_is_forbidden() {
        assert_eq!(
            fired(
                RULES,
                "src/notes/apps/note.assembler.ts",
                "src/notes/domain/note.repository.ts"
            ),
            vec!["assemblers-no-repositories"]
        );
    }
}
