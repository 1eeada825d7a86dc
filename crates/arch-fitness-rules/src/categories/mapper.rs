//! Mappers translate between persistence and domain shapes.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{ANY_SERVICE, MAPPER, REPOSITORY};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "mappers-no-services",
        severity: Severity::Error,
        comment: "Mappers must not call services",
        from: MatcherTemplate::path(MAPPER),
        to: MatcherTemplate::path(ANY_SERVICE),
    },
    RuleTemplate {
        name: "mappers-no-repositories",
        severity: Severity::Error,
        comment: "Mappers must not call repositories; repositories call mappers",
        from: MatcherTemplate::path(MAPPER),
        to: MatcherTemplate::path(REPOSITORY),
    },
];
