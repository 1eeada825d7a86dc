//! Converters are pure value translations.

use arch_fitness_core::{MatcherTemplate, RuleTemplate, Severity};

use super::CONVERTER;

pub(super) const RULES: &[RuleTemplate] = &[RuleTemplate {
    name: "converters-no-side-effects",
    severity: Severity::Error,
    comment: "Converters must be pure and must not depend on services, repositories, aggregators or transaction scripts",
    from: MatcherTemplate::path(CONVERTER),
    to: MatcherTemplate::path(
        r"\.(service|app-service|repository|aggregator|transaction-script)\.ts$",
    ),
}];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::fired;

    #[test]
    fn converter_to_effectful_component_is_forbidden() {
        let from = "src/notes/domain/note.converter.ts";
        for to in [
            "src/notes/domain/note.repository.ts",
            "src/notes/domain/note.service.ts",
            "src/notes/domain/aggregators/note.aggregator.ts",
            "src/notes/domain/create-note.transaction-script.ts",
        ] {
            assert_eq!(fired(RULES, from, to), vec!["converters-no-side-effects"], "{to}");
        }
    }

    #[test]
    fn converter_may_use_other_converters_and_entities() {
        let from = "src/notes/domain/note.converter.ts";
        assert!(fired(RULES, from, "src/notes/domain/tag.converter.ts").is_empty());
        assert!(fired(RULES, from, "src/notes/domain/note.entity.ts").is_empty());
    }
}
