//! Forbidden-dependency rules and the registry that composes them.
//!
//! Rules come from independent category lists. [`RuleRegistry::compose`]
//! concatenates them in declaration order, appends the generated
//! domain-boundary rule and rejects duplicate names.

use std::collections::{HashMap, HashSet};

use crate::boundary::DomainBoundaryRule;
use crate::config::RuleConfig;
use crate::graph::DependencyEdge;
use crate::pattern::{Matcher, PatternError};
use crate::types::Severity;

/// Errors raised while assembling the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two rules share a name.
    #[error("duplicate rule name `{name}` (categories `{first}` and `{second}`)")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Category that declared it first.
        first: String,
        /// Category that declared it again.
        second: String,
    },

    /// A `[rules.<name>]` override names no registered rule.
    #[error("override for unknown rule `{0}`")]
    UnknownOverride(String),

    /// A pattern in a rule failed to compile.
    #[error("rule `{rule}`: {source}")]
    Pattern {
        /// Rule being compiled.
        rule: String,
        /// Pattern failure.
        source: PatternError,
    },
}

/// Static template for a matcher; `{root}` is substituted at compile time.
#[derive(Debug, Clone, Copy)]
pub struct MatcherTemplate {
    /// Include pattern.
    pub path: &'static str,
    /// Exclude patterns.
    pub path_not: &'static [&'static str],
}

impl MatcherTemplate {
    /// Template with no exclusions.
    #[must_use]
    pub const fn path(path: &'static str) -> Self {
        Self {
            path,
            path_not: &[],
        }
    }

    /// Template with exclusions.
    #[must_use]
    pub const fn path_not(path: &'static str, path_not: &'static [&'static str]) -> Self {
        Self { path, path_not }
    }
}

/// Rule authored as static data.
#[derive(Debug, Clone, Copy)]
pub struct RuleTemplate {
    /// Unique rule name.
    pub name: &'static str,
    /// Severity.
    pub severity: Severity,
    /// Why the dependency is forbidden; shown as the violation message.
    pub comment: &'static str,
    /// Source side.
    pub from: MatcherTemplate,
    /// Destination side.
    pub to: MatcherTemplate,
}

impl RuleTemplate {
    /// Compiles the template against a source root.
    ///
    /// # Errors
    ///
    /// Returns error naming the rule if a pattern is invalid.
    pub fn compile(&self, root: &str) -> Result<RuleDefinition, RegistryError> {
        let wrap = |source| RegistryError::Pattern {
            rule: self.name.to_string(),
            source,
        };
        let from = Matcher::compile(self.from.path, self.from.path_not, root).map_err(wrap)?;
        let to = Matcher::compile(self.to.path, self.to.path_not, root).map_err(wrap)?;
        Ok(RuleDefinition::new(self.name, self.severity, self.comment, from, to))
    }
}

/// Compiles a list of templates.
///
/// # Errors
///
/// Returns the first template that fails to compile.
pub fn compile_all(templates: &[RuleTemplate], root: &str) -> Result<Vec<RegisteredRule>, RegistryError> {
    templates
        .iter()
        .map(|t| t.compile(root).map(RegisteredRule::Forbidden))
        .collect()
}

/// A named `from -> to` predicate whose satisfaction is a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    name: String,
    severity: Severity,
    comment: String,
    from: Matcher,
    to: Matcher,
}

impl RuleDefinition {
    /// Creates a rule from compiled matchers.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        severity: Severity,
        comment: impl Into<String>,
        from: Matcher,
        to: Matcher,
    ) -> Self {
        Self {
            name: name.into(),
            severity,
            comment: comment.into(),
            from,
            to,
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the explanatory comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Whether the edge violates this rule.
    #[must_use]
    pub fn forbids(&self, edge: &DependencyEdge) -> bool {
        self.from.test(edge.from.as_str()) && self.to.test(edge.to.as_str())
    }

    /// Returns the source matcher.
    #[must_use]
    pub fn from(&self) -> &Matcher {
        &self.from
    }

    /// Returns the destination matcher.
    #[must_use]
    pub fn to(&self) -> &Matcher {
        &self.to
    }
}

/// Flags modules with no edges at all, unless exempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanRule {
    name: String,
    severity: Severity,
    comment: String,
}

impl OrphanRule {
    /// Creates an orphan rule.
    #[must_use]
    pub fn new(name: impl Into<String>, severity: Severity, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity,
            comment: comment.into(),
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the explanatory comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Any rule the evaluator understands.
#[derive(Debug, Clone)]
pub enum RegisteredRule {
    /// Statically compiled `from`/`to` matchers.
    Forbidden(RuleDefinition),
    /// Per-edge specialised domain boundary.
    DomainBoundary(DomainBoundaryRule),
    /// Degree-zero node detection.
    Orphan(OrphanRule),
}

impl RegisteredRule {
    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Forbidden(r) => &r.name,
            Self::DomainBoundary(r) => r.name(),
            Self::Orphan(r) => &r.name,
        }
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Forbidden(r) => r.severity,
            Self::DomainBoundary(r) => r.severity(),
            Self::Orphan(r) => r.severity,
        }
    }

    /// Returns the explanatory comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        match self {
            Self::Forbidden(r) => &r.comment,
            Self::DomainBoundary(r) => r.comment(),
            Self::Orphan(r) => &r.comment,
        }
    }

    fn set_severity(&mut self, severity: Severity) {
        match self {
            Self::Forbidden(r) => r.severity = severity,
            Self::DomainBoundary(r) => r.set_severity(severity),
            Self::Orphan(r) => r.severity = severity,
        }
    }
}

/// A named list of rules, compiled before composition.
#[derive(Debug, Clone)]
pub struct RuleCategory {
    name: String,
    rules: Vec<RegisteredRule>,
}

impl RuleCategory {
    /// Creates a category.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<RegisteredRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rules.
    #[must_use]
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }
}

/// A rule together with the category it came from.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Category name.
    pub category: String,
    /// The rule.
    pub rule: RegisteredRule,
}

/// Category used for the generated domain-boundary rule.
pub const DOMAIN_BOUNDARY_CATEGORY: &str = "domain-boundary";

/// All active rules in declaration order. Immutable once composed.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    entries: Vec<RegistryEntry>,
}

impl RuleRegistry {
    /// Concatenates category lists and the boundary rule into one registry.
    ///
    /// # Errors
    ///
    /// Returns error if two rules share a name.
    pub fn compose(
        categories: Vec<RuleCategory>,
        boundary: Option<DomainBoundaryRule>,
    ) -> Result<Self, RegistryError> {
        let mut entries: Vec<RegistryEntry> = categories
            .into_iter()
            .flat_map(|c| {
                let category = c.name;
                c.rules.into_iter().map(move |rule| RegistryEntry {
                    category: category.clone(),
                    rule,
                })
            })
            .collect();
        if let Some(rule) = boundary {
            entries.push(RegistryEntry {
                category: DOMAIN_BOUNDARY_CATEGORY.to_string(),
                rule: RegisteredRule::DomainBoundary(rule),
            });
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for entry in &entries {
            if let Some(first) = seen.insert(entry.rule.name(), &entry.category) {
                return Err(RegistryError::DuplicateName {
                    name: entry.rule.name().to_string(),
                    first: first.to_string(),
                    second: entry.category.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Applies `[rules.<name>]` overrides: disabled rules are removed and
    /// severities replaced.
    ///
    /// # Errors
    ///
    /// Returns error if an override names an unknown rule.
    pub fn with_overrides(mut self, overrides: &HashMap<String, RuleConfig>) -> Result<Self, RegistryError> {
        let known: HashSet<&str> = self.entries.iter().map(|e| e.rule.name()).collect();
        let mut unknown: Vec<&String> = overrides
            .keys()
            .filter(|name| !known.contains(name.as_str()))
            .collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(RegistryError::UnknownOverride((*name).clone()));
        }

        self.entries.retain(|e| {
            overrides
                .get(e.rule.name())
                .map_or(true, |c| c.enabled.unwrap_or(true))
        });
        for entry in &mut self.entries {
            if let Some(severity) = overrides.get(entry.rule.name()).and_then(|c| c.severity) {
                entry.rule.set_severity(severity);
            }
        }
        Ok(self)
    }

    /// Returns all entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredRule> {
        self.entries
            .iter()
            .map(|e| &e.rule)
            .find(|r| r.name() == name)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ModulePath;

    const SERVICES: RuleTemplate = RuleTemplate {
        name: "services-no-other-services",
        severity: Severity::Error,
        comment: "A service must not call another service",
        from: MatcherTemplate::path(r"\.service\.ts$"),
        to: MatcherTemplate::path(r"\.service\.ts$"),
    };

    const DOMAIN_NO_APPS: RuleTemplate = RuleTemplate {
        name: "domain-no-app-layer",
        severity: Severity::Warn,
        comment: "",
        from: MatcherTemplate::path_not("^{root}/[^/]+/domain/", &[r"\.spec\.ts$"]),
        to: MatcherTemplate::path("^{root}/[^/]+/apps/"),
    };

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge::new(
            ModulePath::normalize(from).unwrap(),
            ModulePath::normalize(to).unwrap(),
        )
    }

    fn category(name: &str, templates: &[RuleTemplate]) -> RuleCategory {
        RuleCategory::new(name, compile_all(templates, "src").unwrap())
    }

    #[test]
    fn compiled_template_forbids_matching_edge() {
        let rule = SERVICES.compile("src").unwrap();
        assert!(rule.forbids(&edge(
            "src/notes/domain/a.service.ts",
            "src/notes/domain/b.service.ts"
        )));
        assert!(!rule.forbids(&edge(
            "src/notes/domain/a.service.ts",
            "src/notes/domain/b.repository.ts"
        )));
    }

    #[test]
    fn template_root_placeholder_is_substituted() {
        let rule = DOMAIN_NO_APPS.compile("lib").unwrap();
        assert!(rule.forbids(&edge("lib/notes/domain/a.ts", "lib/notes/apps/b.ts")));
        assert!(!rule.forbids(&edge("src/notes/domain/a.ts", "src/notes/apps/b.ts")));
        assert!(!rule.forbids(&edge("lib/notes/domain/a.spec.ts", "lib/notes/apps/b.ts")));
    }

    #[test]
    fn compose_preserves_declaration_order() {
        let registry = RuleRegistry::compose(
            vec![category("service", &[SERVICES]), category("layering", &[DOMAIN_NO_APPS])],
            None,
        )
        .unwrap();
        let names: Vec<&str> = registry.entries().iter().map(|e| e.rule.name()).collect();
        assert_eq!(names, vec!["services-no-other-services", "domain-no-app-layer"]);
        assert_eq!(registry.entries()[1].category, "layering");
    }

    #[test]
    fn compose_rejects_duplicate_names() {
        let err = RuleRegistry::compose(
            vec![category("service", &[SERVICES]), category("other", &[SERVICES])],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "services-no-other-services".into(),
                first: "service".into(),
                second: "other".into(),
            }
        );
    }

    #[test]
    fn overrides_disable_and_change_severity() {
        let registry = RuleRegistry::compose(
            vec![category("service", &[SERVICES]), category("layering", &[DOMAIN_NO_APPS])],
            None,
        )
        .unwrap();
        let overrides: HashMap<String, RuleConfig> = [
            (
                "services-no-other-services".to_string(),
                RuleConfig {
                    enabled: Some(false),
                    severity: None,
                },
            ),
            (
                "domain-no-app-layer".to_string(),
                RuleConfig {
                    enabled: None,
                    severity: Some(Severity::Error),
                },
            ),
        ]
        .into_iter()
        .collect();

        let registry = registry.with_overrides(&overrides).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("domain-no-app-layer").map(RegisteredRule::severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn overrides_reject_unknown_rule() {
        let registry = RuleRegistry::compose(vec![category("service", &[SERVICES])], None).unwrap();
        let overrides: HashMap<String, RuleConfig> =
            [("no-such-rule".to_string(), RuleConfig::default())]
                .into_iter()
                .collect();
        assert_eq!(
            registry.with_overrides(&overrides).unwrap_err(),
            RegistryError::UnknownOverride("no-such-rule".into())
        );
    }

    #[test]
    fn invalid_template_names_the_rule() {
        const BAD: RuleTemplate = RuleTemplate {
            name: "bad-rule",
            severity: Severity::Error,
            comment: "",
            from: MatcherTemplate::path("(unclosed"),
            to: MatcherTemplate::path("x"),
        };
        let err = BAD.compile("src").unwrap_err();
        assert!(err.to_string().starts_with("rule `bad-rule`"));
    }
}
