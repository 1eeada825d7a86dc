//! Evaluates the rule registry against a module graph.

use tracing::debug;

use crate::boundary::DomainBoundaryRule;
use crate::graph::{DependencyEdge, ModuleGraph};
use crate::orphan::detect_orphans;
use crate::pattern::PatternError;
use crate::rule::{RegisteredRule, RuleDefinition, RuleRegistry};
use crate::types::{Suggestion, Violation};

/// Checks every edge against every rule.
///
/// Output is ordered by rule declaration, then edge discovery order, so two
/// evaluations of the same graph yield identical lists. An edge may violate
/// several rules at once.
///
/// # Errors
///
/// Returns error if a per-edge domain boundary pattern cannot be compiled.
pub fn evaluate(graph: &ModuleGraph, registry: &RuleRegistry) -> Result<Vec<Violation>, PatternError> {
    let mut violations = Vec::new();
    for entry in registry.entries() {
        let before = violations.len();
        match &entry.rule {
            RegisteredRule::Forbidden(rule) => {
                violations.extend(
                    graph
                        .edges()
                        .iter()
                        .filter(|e| rule.forbids(e))
                        .map(|e| forbidden_violation(rule, e)),
                );
            }
            RegisteredRule::DomainBoundary(rule) => {
                for edge in graph.edges() {
                    if rule.forbids(edge)? {
                        violations.push(boundary_violation(rule, edge));
                    }
                }
            }
            RegisteredRule::Orphan(rule) => violations.extend(detect_orphans(graph, rule)),
        }
        debug!(
            "{} [{}]: {} violation(s)",
            entry.rule.name(),
            entry.category,
            violations.len() - before
        );
    }
    Ok(violations)
}

fn forbidden_violation(rule: &RuleDefinition, edge: &DependencyEdge) -> Violation {
    Violation::dependency(
        rule.name(),
        rule.severity(),
        edge.from.as_str(),
        edge.to.as_str(),
        rule.comment(),
    )
}

fn boundary_violation(rule: &DomainBoundaryRule, edge: &DependencyEdge) -> Violation {
    Violation::dependency(
        rule.name(),
        rule.severity(),
        edge.from.as_str(),
        edge.to.as_str(),
        rule.comment(),
    )
    .with_suggestion(Suggestion::new(
        "Depend on the target module's aggregator, port or module file instead",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::NonDomainModules;
    use crate::graph::{ModulePath, Node};
    use crate::pattern::{Matcher, PathPattern};
    use crate::rule::{OrphanRule, RuleCategory};
    use crate::types::Severity;

    fn path(p: &str) -> ModulePath {
        ModulePath::normalize(p).unwrap()
    }

    fn graph(edges: &[(&str, &str)]) -> ModuleGraph {
        let mut nodes: Vec<Node> = edges
            .iter()
            .flat_map(|(f, t)| [*f, *t])
            .map(|p| Node {
                path: path(p),
                is_orphan_exempt: false,
            })
            .collect();
        nodes.sort_by(|a, b| a.path.cmp(&b.path));
        nodes.dedup();
        let edges = edges
            .iter()
            .map(|(f, t)| DependencyEdge::new(path(f), path(t)))
            .collect();
        ModuleGraph::new(nodes, edges)
    }

    fn registry() -> RuleRegistry {
        let empty: [&str; 0] = [];
        let services = RuleDefinition::new(
            "services-no-other-services",
            Severity::Error,
            "A service must not call another service",
            Matcher::compile(r"\.service\.ts$", &empty, "src").unwrap(),
            Matcher::compile(r"\.service\.ts$", &empty, "src").unwrap(),
        );
        let boundary = DomainBoundaryRule::new(
            "src",
            &NonDomainModules::new(["shared-kernel"]).unwrap(),
            PathPattern::new(r"(\.aggregator\.ts$|/aggregators/)").unwrap(),
            Severity::Error,
        )
        .unwrap();
        RuleRegistry::compose(
            vec![
                RuleCategory::new("service", vec![RegisteredRule::Forbidden(services)]),
                RuleCategory::new(
                    "common",
                    vec![RegisteredRule::Orphan(OrphanRule::new(
                        "no-orphans",
                        Severity::Warn,
                        "orphan",
                    ))],
                ),
            ],
            Some(boundary),
        )
        .unwrap()
    }

    fn rules_hit(v: &[Violation]) -> Vec<&str> {
        v.iter().map(|v| v.rule.as_str()).collect()
    }

    #[test]
    fn same_domain_services_hit_category_rule_only() {
        let g = graph(&[("src/notes/domain/a.service.ts", "src/notes/domain/b.service.ts")]);
        let v = evaluate(&g, &registry()).unwrap();
        assert_eq!(rules_hit(&v), vec!["services-no-other-services"]);
    }

    #[test]
    fn edge_may_violate_several_rules() {
        let g = graph(&[(
            "src/notes/domain/a.service.ts",
            "src/check-items/domain/services/y.service.ts",
        )]);
        let v = evaluate(&g, &registry()).unwrap();
        assert_eq!(
            rules_hit(&v),
            vec!["services-no-other-services", "domain-module-boundary"]
        );
        assert_eq!(v[1].target(), Some("src/check-items/domain/services/y.service.ts"));
        assert!(v[1].suggestion.is_some());
    }

    #[test]
    fn gateway_target_is_not_reported() {
        let g = graph(&[(
            "src/notes/apps/x.controller.ts",
            "src/check-items/domain/aggregators/x.aggregator.ts",
        )]);
        assert!(evaluate(&g, &registry()).unwrap().is_empty());
    }

    #[test]
    fn output_is_ordered_by_rule_then_edge() {
        let g = graph(&[
            ("src/a/x.service.ts", "src/b/y.ts"),
            ("src/a/p.service.ts", "src/a/q.service.ts"),
            ("src/c/z.ts", "src/d/w.ts"),
        ]);
        let v = evaluate(&g, &registry()).unwrap();
        let pairs: Vec<(&str, &str)> = v
            .iter()
            .map(|v| (v.rule.as_str(), v.location.file.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("services-no-other-services", "src/a/p.service.ts"),
                ("domain-module-boundary", "src/a/x.service.ts"),
                ("domain-module-boundary", "src/c/z.ts"),
            ]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let g = graph(&[
            ("src/notes/a.service.ts", "src/other/b.service.ts"),
            ("src/shared-kernel/k.ts", "src/notes/a.service.ts"),
        ]);
        let r = registry();
        assert_eq!(evaluate(&g, &r).unwrap(), evaluate(&g, &r).unwrap());
    }

    #[test]
    fn orphan_rule_is_delegated() {
        let g = ModuleGraph::new(
            vec![Node {
                path: path("src/lonely.ts"),
                is_orphan_exempt: false,
            }],
            vec![],
        );
        let v = evaluate(&g, &registry()).unwrap();
        assert_eq!(rules_hit(&v), vec!["no-orphans"]);
    }
}
