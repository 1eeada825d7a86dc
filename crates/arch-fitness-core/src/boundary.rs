//! Domain module boundaries.
//!
//! Every top-level directory under the source root is a domain module,
//! except the ones listed in [`NonDomainModules`]. A domain module may import
//! its own files freely; files of another domain module are reachable only
//! through that module's gateway surface (aggregators, ports, module files).
//!
//! The "same module" exclusion cannot be a fixed pattern: it depends on which
//! module the importing file belongs to. [`DomainBoundaryRule::to_matcher`]
//! therefore builds the destination [`Matcher`] per edge from the segment
//! captured on the `from` side.

use crate::graph::DependencyEdge;
use crate::pattern::{Matcher, PathPattern, PatternError};
use crate::types::Severity;

/// Top-level directories exempt from boundary enforcement on either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonDomainModules {
    names: Vec<String>,
}

impl NonDomainModules {
    /// Creates the list.
    ///
    /// # Errors
    ///
    /// Returns error if the list is empty or a name is empty or contains `/`.
    pub fn new<I, S>(names: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(PatternError::Empty);
        }
        if let Some(bad) = names.iter().find(|n| n.is_empty() || n.contains('/')) {
            return Err(PatternError::Invalid {
                pattern: bad.clone(),
                reason: "module names must be a single non-empty path segment".to_string(),
            });
        }
        Ok(Self { names })
    }

    /// Returns the module names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `segment` is a non-domain module.
    #[must_use]
    pub fn contains(&self, segment: &str) -> bool {
        self.names.iter().any(|n| n == segment)
    }

    /// Pattern matching any path inside a non-domain module.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern cannot be compiled.
    pub fn pattern(&self, root: &str) -> Result<PathPattern, PatternError> {
        PathPattern::top_level_any(root, &self.names)
    }
}

/// Forbids cross-domain imports that bypass the target's gateway surface.
#[derive(Debug, Clone)]
pub struct DomainBoundaryRule {
    name: String,
    severity: Severity,
    comment: String,
    root: String,
    from_include: PathPattern,
    from_excludes: Vec<PathPattern>,
    to_include: PathPattern,
    to_static_excludes: Vec<PathPattern>,
}

impl DomainBoundaryRule {
    /// Default rule name.
    pub const NAME: &'static str = "domain-module-boundary";

    /// Builds the rule for `root`.
    ///
    /// # Errors
    ///
    /// Returns error if a generated pattern is invalid.
    pub fn new(
        root: &str,
        non_domain: &NonDomainModules,
        gateway: PathPattern,
        severity: Severity,
    ) -> Result<Self, PatternError> {
        let escaped = regex::escape(root);
        let non_domain = non_domain.pattern(root)?;
        Ok(Self {
            name: Self::NAME.to_string(),
            severity,
            comment: "Domain modules may only import other domain modules through their \
                      aggregators, ports or module files"
                .to_string(),
            root: root.to_string(),
            from_include: PathPattern::new(&format!("^{escaped}/([^/]+)/"))?,
            from_excludes: vec![non_domain.clone()],
            to_include: PathPattern::new(&format!("^{escaped}/[^/]+/"))?,
            to_static_excludes: vec![non_domain, gateway],
        })
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

    pub(crate) fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    /// Top-level domain segment of `from`, or `None` when the path is not
    /// constrained (outside a module, or inside a non-domain module).
    #[must_use]
    pub fn captured_segment<'p>(&self, from: &'p str) -> Option<&'p str> {
        if self.from_excludes.iter().any(|e| e.is_match(from)) {
            return None;
        }
        self.from_include.capture(from, 1)
    }

    /// Destination matcher specialised for an importer in module `segment`.
    ///
    /// Its excludes are the same-module pattern for `segment`, the
    /// non-domain pattern and the gateway surface.
    ///
    /// # Errors
    ///
    /// Returns error if the specialised pattern cannot be compiled.
    pub fn to_matcher(&self, segment: &str) -> Result<Matcher, PatternError> {
        let same_module = PathPattern::new(&format!(
            "^{}/{}/",
            regex::escape(&self.root),
            regex::escape(segment)
        ))?;
        let mut excludes = Vec::with_capacity(1 + self.to_static_excludes.len());
        excludes.push(same_module);
        excludes.extend(self.to_static_excludes.iter().cloned());
        Ok(Matcher::new(self.to_include.clone(), excludes))
    }

    /// Whether the edge crosses a domain boundary illegally.
    ///
    /// # Errors
    ///
    /// Returns error if the per-edge matcher cannot be compiled.
    pub fn forbids(&self, edge: &DependencyEdge) -> Result<bool, PatternError> {
        let Some(segment) = self.captured_segment(edge.from.as_str()) else {
            return Ok(false);
        };
        Ok(self.to_matcher(segment)?.test(edge.to.as_str()))
    }
}
