//! Core types for architecture violations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding.
    Info,
    /// Warning that should be addressed.
    #[serde(alias = "warning")]
    Warn,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity name as written in policy files.
    ///
    /// Accepts `warning` as an alias of `warn`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where a violation was found.
///
/// `file` is always project-relative with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Project-relative path.
    pub file: String,
    /// Line number (1-indexed), for content findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Location {
    /// Creates a file-level location.
    #[must_use]
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
        }
    }

    /// Creates a location pointing at a specific line.
    #[must_use]
    pub fn line(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file),
            None => write!(f, "{}", self.file),
        }
    }
}

/// What kind of finding a violation is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViolationKind {
    /// A forbidden `from -> to` dependency edge.
    Dependency {
        /// Destination module of the offending edge.
        to: String,
    },
    /// A module with no incoming or outgoing edges.
    Orphan,
    /// A file whose name breaks a naming convention.
    Filename,
    /// A line inside a file that breaks a naming convention.
    Content,
    /// A centralized folder that should have been colocated.
    #[serde(rename_all = "camelCase")]
    CentralizedFolder {
        /// Number of source files found in the folder.
        file_count: usize,
    },
    /// A file lacking its required sibling consumer.
    OrphanedFile,
}

impl ViolationKind {
    /// Short label used in compact output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dependency { .. } => "dependency",
            Self::Orphan => "orphan",
            Self::Filename => "filename",
            Self::Content => "content",
            Self::CentralizedFolder { .. } => "centralizedFolder",
            Self::OrphanedFile => "orphanedFile",
        }
    }
}

/// A remediation hint attached to a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An architecture violation found by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the rule or check that fired (e.g. "services-no-other-services").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// Primary location (the `from` side for dependency violations).
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Offending source text, for content findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Optional remediation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        kind: ViolationKind,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            kind,
            location,
            message: message.into(),
            snippet: None,
            suggestion: None,
        }
    }

    /// Creates a dependency violation for the edge `from -> to`.
    #[must_use]
    pub fn dependency(
        rule: impl Into<String>,
        severity: Severity,
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            rule,
            severity,
            ViolationKind::Dependency { to: to.into() },
            Location::file(from),
            message,
        )
    }

    /// Attaches the offending source text.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Returns the destination of a dependency violation.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            ViolationKind::Dependency { to } => Some(to),
            _ => None,
        }
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = match self.target() {
            Some(to) => format!("{} {} -> {}\n", self.rule, self.location, to),
            None => format!("{} at {}\n", self.rule, self.location),
        };
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(snippet) = &self.snippet {
            let _ = writeln!(output, "  | {snippet}");
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(to) => write!(
                f,
                "{} -> {}: {} [{}] {}",
                self.location, to, self.severity, self.rule, self.message
            ),
            None => write!(
                f,
                "{}: {} [{}] {}",
                self.location, self.severity, self.rule, self.message
            ),
        }
    }
}

/// Counts violations as `(errors, warnings, infos)`.
#[must_use]
pub fn count_by_severity(violations: &[Violation]) -> (usize, usize, usize) {
    violations
        .iter()
        .fold((0, 0, 0), |(e, w, i), v| match v.severity {
            Severity::Error => (e + 1, w, i),
            Severity::Warn => (e, w + 1, i),
            Severity::Info => (e, w, i + 1),
        })
}
