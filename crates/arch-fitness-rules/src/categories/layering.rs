//! Layer direction: apps → domain → nothing above it.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{APP_LAYER, CONTROLLER, DOMAIN_LAYER};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "domain-no-app-layer",
        severity: Severity::Error,
        comment: "The domain layer must not depend on the application layer",
        from: MatcherTemplate::path(DOMAIN_LAYER),
        to: MatcherTemplate::path(APP_LAYER),
    },
    RuleTemplate {
        name: "domain-no-infrastructure",
        severity: Severity::Error,
        comment: "The domain layer must depend on ports, not on infrastructure adapters",
        from: MatcherTemplate::path(DOMAIN_LAYER),
        to: MatcherTemplate::path("^{root}/[^/]+/infrastructure/"),
    },
    RuleTemplate {
        name: "controllers-only-from-app-layer",
        severity: Severity::Error,
        comment: "Controllers are entry points; only their module file and the application layer may reference them",
        from: MatcherTemplate::path_not("^{root}/", &[APP_LAYER, r"\.module\.ts$"]),
        to: MatcherTemplate::path(CONTROLLER),
    },
];
