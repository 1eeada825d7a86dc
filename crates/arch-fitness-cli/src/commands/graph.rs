//! Graph command implementation.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use arch_fitness_core::{ModuleGraph, ModuleGraphBuilder};
use tracing::info;

use crate::config_resolver::ConfigSource;
use crate::GraphFormat;

/// Builds the module graph with the project's analyzer settings and prints it.
pub fn run(path: &Path, format: GraphFormat, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let policy = super::policy(path, &config)?;
    let graph = ModuleGraphBuilder::new(policy.scan(), policy.orphan_exemptions())?
        .build()
        .with_context(|| format!("Failed to build module graph for {}", path.display()))?;

    info!("{} module(s), {} edge(s)", graph.nodes().len(), graph.edges().len());

    let rendered = match format {
        GraphFormat::Text => render_text(&graph),
        GraphFormat::Json => serde_json::to_string_pretty(&graph)? + "\n",
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(graph: &ModuleGraph) -> String {
    let mut out = format!("Modules ({}):\n", graph.nodes().len());
    for node in graph.nodes() {
        let marker = if node.is_orphan_exempt { " [orphan-exempt]" } else { "" };
        let _ = writeln!(out, "  {}{marker}", node.path);
    }
    let _ = writeln!(out, "\nEdges ({}):", graph.edges().len());
    for edge in graph.edges() {
        let _ = writeln!(out, "  {} -> {}", edge.from, edge.to);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_fitness_core::{DependencyEdge, ModulePath, Node};

    fn path(p: &str) -> ModulePath {
        ModulePath::normalize(p).unwrap()
    }

    #[test]
    fn text_lists_nodes_then_edges() {
        let graph = ModuleGraph::new(
            vec![
                Node {
                    path: path("src/notes/domain/note.service.ts"),
                    is_orphan_exempt: false,
                },
                Node {
                    path: path("src/database/data-source.ts"),
                    is_orphan_exempt: true,
                },
            ],
            vec![DependencyEdge::new(
                path("src/notes/domain/note.service.ts"),
                path("src/database/data-source.ts"),
            )],
        );
        insta::assert_snapshot!(render_text(&graph), @r"
        Modules (2):
          src/database/data-source.ts [orphan-exempt]
          src/notes/domain/note.service.ts

        Edges (1):
          src/notes/domain/note.service.ts -> src/database/data-source.ts
        ");
    }
}
