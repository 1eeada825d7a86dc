//! Transaction scripts: one business operation each.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::{APP_SERVICE, TRANSACTION_SCRIPT};

pub(super) const RULES: &[RuleTemplate] = &[
    RuleTemplate {
        name: "transaction-scripts-no-other-transaction-scripts",
        severity: Severity::Error,
        comment: "A transaction script must not call another transaction script",
        from: MatcherTemplate::path(TRANSACTION_SCRIPT),
        to: MatcherTemplate::path(TRANSACTION_SCRIPT),
    },
    RuleTemplate {
        name: "transaction-scripts-no-app-services",
        severity: Severity::Error,
        comment: "Transaction scripts are called by app-services, never the other way round",
        from: MatcherTemplate::path(TRANSACTION_SCRIPT),
        to: MatcherTemplate::path(APP_SERVICE),
    },
];
