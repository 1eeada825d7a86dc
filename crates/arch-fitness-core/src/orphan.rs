//! Orphan module detection.

use crate::graph::ModuleGraph;
use crate::rule::OrphanRule;
use crate::types::{Location, Suggestion, Violation, ViolationKind};

/// Reports every non-exempt node with neither incoming nor outgoing edges.
///
/// Degrees count only edges inside the graph; external and unresolved
/// references were dropped while building it. Output follows node order.
#[must_use]
pub fn detect_orphans(graph: &ModuleGraph, rule: &OrphanRule) -> Vec<Violation> {
    let connected = graph.connected_paths();
    graph
        .nodes()
        .iter()
        .filter(|n| !n.is_orphan_exempt && !connected.contains(n.path.as_str()))
        .map(|n| {
            Violation::new(
                rule.name(),
                rule.severity(),
                ViolationKind::Orphan,
                Location::file(n.path.as_str()),
                rule.comment(),
            )
            .with_suggestion(Suggestion::new(
                "Import this module where it is used, or delete it",
            ))
        })
        .collect()
}
