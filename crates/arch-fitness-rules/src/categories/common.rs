//! Rules that apply to every file regardless of category.

use arch_fitness_core::{MatcherTemplate, OrphanRule, RuleTemplate, Severity};

use super::SPEC_FILE;

/// Name of the orphan rule.
pub const ORPHAN_RULE: &str = "no-orphans";

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "not-to-spec",
        severity: Severity::Error,
        comment: "Production code must not import spec or test files",
        from: MatcherTemplate::path_not("^{root}/", &[SPEC_FILE, "/__specs__/", "/__tests__/"]),
        to: MatcherTemplate::path(r"(\.(spec|test)\.[cm]?[jt]sx?$|/__specs__/|/__tests__/)"),
    },
    RuleTemplate {
        name: "not-to-migrations",
        severity: Severity::Error,
        comment: "Only the persistence setup may reference migrations",
        from: MatcherTemplate::path_not("^{root}/", &["/migrations/", "^{root}/database/"]),
        to: MatcherTemplate::path("/migrations/"),
    },
];

/// The built-in orphan rule (severity warn).
#[must_use]
pub fn orphan_rule() -> OrphanRule {
    OrphanRule::new(
        ORPHAN_RULE,
        Severity::Warn,
        "Module is neither imported nor imports anything; it is likely dead code",
    )
}
