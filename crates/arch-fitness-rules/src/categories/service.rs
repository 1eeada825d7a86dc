//! Domain services. App-services (`.app-service.ts`) have their own category.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{APP_LAYER, SERVICE};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "services-no-other-services",
        severity: Severity::Error,
        comment: "A service must not depend on another service; compose them in an aggregator or transaction script",
        from: MatcherTemplate::path(SERVICE),
        to: MatcherTemplate::path(SERVICE),
    },
    RuleTemplate {
        name: "services-no-app-layer",
        severity: Severity::Error,
        comment: "Services belong to the domain layer and must not depend on the application layer",
        from: MatcherTemplate::path(SERVICE),
        to: MatcherTemplate::path(APP_LAYER),
    },
];
