//! App-services orchestrate use cases in the application layer.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{APP_SERVICE, REPOSITORY};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "app-services-no-other-app-services",
        severity: Severity::Error,
        comment: "An app-service must not call another app-service; extract the shared step into the domain",
        from: MatcherTemplate::path(APP_SERVICE),
        to: MatcherTemplate::path(APP_SERVICE),
    },
    RuleTemplate {
        name: "app-services-no-repositories",
        severity: Severity::Error,
        comment: "App-services reach persistence through aggregators or transaction scripts, not repositories",
        from: MatcherTemplate::path(APP_SERVICE),
        to: MatcherTemplate::path(REPOSITORY),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::fired;

    #[test]
    fn app_service_chain_is_forbidden() {
        assert_eq!(
            fired(
                RULES,
                "src/notes/apps/notes.app-service.ts",
                "src/notes/apps/tags.app-service.ts"
            ),
            vec!["app-services-no-other-app-services"]
        );
    }

    #[test]
    fn app_service_to_repository_is_forbidden() {
        assert_eq!(
            fired(
                RULES,
                "src/notes/apps/notes.app-service.ts",
                "src/notes/domain/note.repository.ts"
            ),
            vec!["app-services-no-repositories"]
        );
    }

    #[test]
    fn plain_service_is_not_an_app_service() {
        assert!(fired(
            RULES,
            "src/notes/domain/note.service.ts",
            "src/notes/apps/notes.app-service.ts"
        )
        .is_empty());
    }
}
