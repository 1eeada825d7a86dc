//! Repositories own persistence for one aggregate.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{ANY_SERVICE, REPOSITORY};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "repositories-no-services",
        severity: Severity::Error,
        comment: "Repositories sit below services and must not depend on them",
        from: MatcherTemplate::path(REPOSITORY),
        to: MatcherTemplate::path(ANY_SERVICE),
    },
    RuleTemplate {
        name: "repositories-no-other-repositories",
        severity: Severity::Error,
        comment: "A repository must not depend on another repository",
        from: MatcherTemplate::path(REPOSITORY),
        to: MatcherTemplate::path(REPOSITORY),
    },
];
