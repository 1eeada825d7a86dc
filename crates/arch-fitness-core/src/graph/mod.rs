//! Static module graph: one node per source file, one edge per import.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

mod builder;
mod imports;

pub use builder::{GraphError, ModuleGraphBuilder, ScanSettings, DEFAULT_EXTENSIONS};
pub use imports::ImportScanner;

/// A project-root-relative, `/`-separated module path (e.g. `src/notes/note.service.ts`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Normalizes a relative path: backslashes become `/`, `.` segments and
    /// duplicate separators are dropped, `..` pops the previous segment.
    ///
    /// Returns `None` when `..` would climb above the project root.
    #[must_use]
    pub fn normalize(path: &str) -> Option<Self> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop()?;
                }
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return None;
        }
        Some(Self(segments.join("/")))
    }

    /// Returns the parent directory (`""` for top-level files).
    #[must_use]
    pub fn parent(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A source file in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Module path.
    pub path: ModulePath,
    /// Whether the orphan rule must skip this node.
    pub is_orphan_exempt: bool,
}

/// A directed `from -> to` import relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Importing module.
    pub from: ModulePath,
    /// Imported module.
    pub to: ModulePath,
}

impl DependencyEdge {
    /// Creates an edge.
    #[must_use]
    pub fn new(from: ModulePath, to: ModulePath) -> Self {
        Self { from, to }
    }
}

/// Immutable snapshot of the project's import graph.
///
/// Nodes are sorted by path; edges keep discovery order and are unique
/// per `(from, to)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    nodes: Vec<Node>,
    edges: Vec<DependencyEdge>,
}

impl ModuleGraph {
    /// Creates a graph, dropping self-edges and duplicate `(from, to)` pairs.
    #[must_use]
    pub fn new(mut nodes: Vec<Node>, edges: Vec<DependencyEdge>) -> Self {
        nodes.sort_by(|a, b| a.path.cmp(&b.path));
        let mut seen = HashSet::new();
        let edges = edges
            .into_iter()
            .filter(|e| e.from != e.to)
            .filter(|e| seen.insert((e.from.clone(), e.to.clone())))
            .collect();
        Self { nodes, edges }
    }

    /// Returns all nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all edges in discovery order.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Looks up a node by path.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&Node> {
        self.nodes
            .binary_search_by(|n| n.path.as_str().cmp(path))
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Returns the set of paths that appear on either end of an edge.
    #[must_use]
    pub fn connected_paths(&self) -> HashSet<&str> {
        self.edges
            .iter()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()])
            .collect()
    }
}
