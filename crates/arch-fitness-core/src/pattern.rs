//! Path patterns and include/exclude matchers.
//!
//! A [`PathPattern`] is a regular expression compiled once at construction.
//! A [`Matcher`] pairs one include pattern with any number of exclude
//! patterns: a path matches when the include matches and no exclude does.

use regex::Regex;
use std::fmt;

/// Placeholder substituted with the escaped source root in pattern templates.
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// Errors raised while compiling patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("empty path pattern")]
    Empty,

    /// The pattern is not a valid regular expression.
    #[error("invalid path pattern `{pattern}`: {reason}")]
    Invalid {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// A validated regular expression over project-relative module paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    compiled: Regex,
}

impl PathPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let compiled = Regex::new(pattern).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Compiles a pattern template, replacing `{root}` with the escaped root.
    ///
    /// # Errors
    ///
    /// Returns error if the expanded pattern is invalid.
    pub fn with_root(template: &str, root: &str) -> Result<Self, PatternError> {
        Self::new(&expand_root(template, root))
    }

    /// Builds a pattern matching any path whose first segment under `root`
    /// is one of `segments`.
    ///
    /// # Errors
    ///
    /// Returns error if `segments` is empty.
    pub fn top_level_any<S: AsRef<str>>(root: &str, segments: &[S]) -> Result<Self, PatternError> {
        if segments.is_empty() {
            return Err(PatternError::Empty);
        }
        let alternatives = segments
            .iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(&format!("^{}/({alternatives})/", regex::escape(root)))
    }

    /// Tests whether a path contains a match.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.compiled.is_match(path)
    }

    /// Returns the text of capture group `group` for `path`, if it matched.
    #[must_use]
    pub fn capture<'p>(&self, path: &'p str, group: usize) -> Option<&'p str> {
        self.compiled
            .captures(path)
            .and_then(|c| c.get(group))
            .map(|m| m.as_str())
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Replaces every `{root}` placeholder with the regex-escaped root.
#[must_use]
pub fn expand_root(template: &str, root: &str) -> String {
    template.replace(ROOT_PLACEHOLDER, &regex::escape(root))
}

/// Include pattern plus exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    include: PathPattern,
    excludes: Vec<PathPattern>,
}

impl Matcher {
    /// Creates a matcher from compiled patterns.
    #[must_use]
    pub fn new(include: PathPattern, excludes: Vec<PathPattern>) -> Self {
        Self { include, excludes }
    }

    /// Compiles a matcher from pattern templates.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn compile<S: AsRef<str>>(
        include: &str,
        excludes: &[S],
        root: &str,
    ) -> Result<Self, PatternError> {
        let include = PathPattern::with_root(include, root)?;
        let excludes = excludes
            .iter()
            .map(|e| PathPattern::with_root(e.as_ref(), root))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { include, excludes })
    }

    /// `include` matches and no exclude does.
    #[must_use]
    pub fn test(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.excludes.iter().any(|e| e.is_match(path))
    }

    /// Returns the include pattern.
    #[must_use]
    pub fn include(&self) -> &PathPattern {
        &self.include
    }

    /// Returns the exclude patterns.
    #[must_use]
    pub fn excludes(&self) -> &[PathPattern] {
        &self.excludes
    }
}
