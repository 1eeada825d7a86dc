//! Aggregators are the cross-module gateway of a domain module.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{AGGREGATOR, APP_LAYER};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "aggregators-no-other-aggregators",
        severity: Severity::Error,
        comment: "An aggregator must not depend on another aggregator; compose them in an app-service",
        from: MatcherTemplate::path(AGGREGATOR),
        to: MatcherTemplate::path(AGGREGATOR),
    },
    RuleTemplate {
        name: "aggregators-no-app-layer",
        severity: Severity::Error,
        comment: "Aggregators belong to the domain layer and must not depend on the application layer",
        from: MatcherTemplate::path(AGGREGATOR),
        to: MatcherTemplate::path(APP_LAYER),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::fired;

    #[test]
    fn aggregator_to_aggregator_is_forbidden() {
        assert_eq!(
            fired(
                RULES,
                "src/notes/domain/aggregators/note.aggregator.ts",
                "src/tags/domain/aggregators/tag.aggregator.ts"
            ),
            vec!["aggregators-no-other-aggregators"]
        );
    }

    #[test]
    fn aggregator_to_app_layer_is_forbidden() {
        assert_eq!(
            fired(
                RULES,
                "src/notes/domain/aggregators/note.aggregator.ts",
                "src/notes/apps/actions/create-note.controller.ts"
            ),
            vec!["aggregators-no-app-layer"]
        );
    }

    #[test]
    fn aggregator_may_use_its_services() {
        assert!(fired(
            RULES,
            "src/notes/domain/aggregators/note.aggregator.ts",
            "src/notes/domain/services/note.service.ts"
        )
        .is_empty());
    }
}
