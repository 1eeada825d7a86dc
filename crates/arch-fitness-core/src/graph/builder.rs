//! Walks a source tree and builds the [`ModuleGraph`].

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::imports::{is_relative, ImportScanner};
use super::{DependencyEdge, ModuleGraph, ModulePath, Node};
use crate::pattern::PathPattern;

/// Source extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

/// Errors raised while building the graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An exclude glob could not be compiled.
    #[error("invalid exclude glob `{pattern}`: {source}")]
    Glob {
        /// The offending glob.
        pattern: String,
        /// Compiler diagnostic.
        source: glob::PatternError,
    },

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walker error.
        source: ignore::Error,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The import scanner failed to initialise.
    #[error("import scanner: {0}")]
    Scanner(#[from] regex::Error),
}

/// Which files belong to the analysed project and how imports resolve.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    project_dir: PathBuf,
    root: String,
    extensions: Vec<String>,
    exclude: Vec<glob::Pattern>,
    base_url: Option<String>,
    respect_gitignore: bool,
}

impl ScanSettings {
    /// Creates settings for `project_dir` with sources under `root`.
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>, root: &str) -> Self {
        Self {
            project_dir: project_dir.into(),
            root: root.trim_matches('/').to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            exclude: Vec::new(),
            base_url: Some(String::new()),
            respect_gitignore: true,
        }
    }

    /// Replaces the scanned extensions (with or without leading dot).
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Adds exclude globs matched against project-relative paths.
    ///
    /// # Errors
    ///
    /// Returns error on the first invalid glob.
    pub fn with_excludes<S: AsRef<str>>(mut self, globs: &[S]) -> Result<Self, GraphError> {
        for g in globs {
            let pattern = glob::Pattern::new(g.as_ref()).map_err(|e| GraphError::Glob {
                pattern: g.as_ref().to_string(),
                source: e,
            })?;
            self.exclude.push(pattern);
        }
        Ok(self)
    }

    /// Sets the project-relative directory non-relative specifiers are tried
    /// against. `None` drops every non-relative specifier.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        self.base_url = base_url.map(|b| {
            ModulePath::normalize(b).map_or_else(String::new, |p| p.as_str().to_string())
        });
        self
    }

    /// Sets whether `.gitignore` files are honoured.
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Returns the project directory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the source root (e.g. `src`).
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the absolute-or-cwd-relative source directory.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.project_dir.join(&self.root)
    }

    /// Returns the scanned extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether a file name carries one of the scanned extensions.
    #[must_use]
    pub fn is_source_file(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && self.extensions.iter().any(|e| e == ext))
    }

    /// Whether a project-relative path matches an exclude glob.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|g| g.matches(relative))
    }

    /// Converts a walked path into a project-relative module path.
    #[must_use]
    pub fn relative(&self, path: &Path) -> Option<ModulePath> {
        let rel = path.strip_prefix(&self.project_dir).unwrap_or(path);
        ModulePath::normalize(&rel.to_string_lossy())
    }
}

/// Source files found by a walk.
#[derive(Default)]
struct Discovered {
    included: Vec<ModulePath>,
    excluded: Vec<ModulePath>,
}

/// Builds a [`ModuleGraph`] from a [`ScanSettings`] snapshot.
pub struct ModuleGraphBuilder<'a> {
    settings: &'a ScanSettings,
    orphan_exemptions: &'a [PathPattern],
    scanner: ImportScanner,
}

impl<'a> ModuleGraphBuilder<'a> {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns error if the import scanner cannot be compiled.
    pub fn new(
        settings: &'a ScanSettings,
        orphan_exemptions: &'a [PathPattern],
    ) -> Result<Self, GraphError> {
        Ok(Self {
            settings,
            orphan_exemptions,
            scanner: ImportScanner::new()?,
        })
    }

    /// Lists the included source files, sorted.
    ///
    /// A missing source directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns error if traversal fails.
    pub fn discover_files(&self) -> Result<Vec<ModulePath>, GraphError> {
        Ok(self.walk()?.included)
    }

    /// Walks the source directory, splitting source files by the exclude globs.
    fn walk(&self) -> Result<Discovered, GraphError> {
        let mut found = Discovered::default();
        let source_dir = self.settings.source_dir();
        if !source_dir.is_dir() {
            warn!("Source directory {} does not exist", source_dir.display());
            return Ok(found);
        }

        let mut walker = ignore::WalkBuilder::new(&source_dir);
        walker
            .hidden(false)
            .git_ignore(self.settings.respect_gitignore)
            .sort_by_file_name(|a, b| a.cmp(b));

        for entry in walker.build() {
            let entry = entry.map_err(|e| GraphError::Walk {
                path: source_dir.clone(),
                source: e,
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !self.settings.is_source_file(&name) {
                continue;
            }
            let Some(rel) = self.settings.relative(entry.path()) else {
                continue;
            };
            if self.settings.is_excluded(rel.as_str()) {
                debug!("Excluding: {rel}");
                found.excluded.push(rel);
            } else {
                found.included.push(rel);
            }
        }

        found.included.sort();
        found.excluded.sort();
        Ok(found)
    }

    /// Walks the tree and builds the graph.
    ///
    /// # Errors
    ///
    /// Returns error if traversal or a file read fails.
    pub fn build(&self) -> Result<ModuleGraph, GraphError> {
        let Discovered { included, excluded } = self.walk()?;
        // Excluded files are never scanned but remain resolvable targets.
        let known: HashSet<&str> = included
            .iter()
            .chain(&excluded)
            .map(ModulePath::as_str)
            .collect();
        let excluded_set: HashSet<&str> = excluded.iter().map(ModulePath::as_str).collect();

        let mut edges = Vec::new();
        let mut reached_excluded = BTreeSet::new();
        let mut dropped = 0usize;

        for file in &included {
            let abs = self.settings.project_dir().join(file.as_str());
            let bytes = std::fs::read(&abs).map_err(|e| GraphError::Read {
                path: abs.clone(),
                source: e,
            })?;
            let source = String::from_utf8_lossy(&bytes);

            for specifier in self.scanner.scan(&source) {
                match self.resolve(file, &specifier, &known) {
                    Some(target) => {
                        if excluded_set.contains(target.as_str()) {
                            reached_excluded.insert(target.clone());
                        }
                        edges.push(DependencyEdge::new(file.clone(), target));
                    }
                    None => dropped += 1,
                }
            }
        }

        let mut nodes: Vec<Node> = included
            .into_iter()
            .map(|path| {
                let is_orphan_exempt = self
                    .orphan_exemptions
                    .iter()
                    .any(|p| p.is_match(path.as_str()));
                Node {
                    path,
                    is_orphan_exempt,
                }
            })
            .collect();
        nodes.extend(reached_excluded.into_iter().map(|path| Node {
            path,
            is_orphan_exempt: true,
        }));

        let graph = ModuleGraph::new(nodes, edges);
        info!(
            "Module graph: {} nodes, {} edges ({} external or unresolved references dropped)",
            graph.nodes().len(),
            graph.edges().len(),
            dropped
        );
        Ok(graph)
    }

    /// Resolves a specifier to a discovered source file, if any.
    fn resolve(
        &self,
        from: &ModulePath,
        specifier: &str,
        known: &HashSet<&str>,
    ) -> Option<ModulePath> {
        let joined = if is_relative(specifier) {
            format!("{}/{specifier}", from.parent())
        } else {
            let base = self.settings.base_url.as_deref()?;
            format!("{base}/{specifier}")
        };
        let base = ModulePath::normalize(&joined)?;

        candidates(base.as_str(), self.settings.extensions())
            .into_iter()
            .find(|c| known.contains(c.as_str()))
            .and_then(|c| ModulePath::normalize(&c))
    }
}

/// Candidate file paths for a resolved specifier base, in priority order.
fn candidates(base: &str, extensions: &[String]) -> Vec<String> {
    let mut out = vec![base.to_string()];
    out.extend(extensions.iter().map(|ext| format!("{base}.{ext}")));

    // ESM-style TypeScript imports name the emitted `.js` file.
    for (emitted, sources) in [
        (".js", &["ts", "tsx"][..]),
        (".jsx", &["tsx"][..]),
        (".mjs", &["mts"][..]),
        (".cjs", &["cts"][..]),
    ] {
        if let Some(stem) = base.strip_suffix(emitted) {
            out.extend(sources.iter().map(|ext| format!("{stem}.{ext}")));
        }
    }

    out.extend(extensions.iter().map(|ext| format!("{base}/index.{ext}")));
    out
}
