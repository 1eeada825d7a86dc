//! The `Check` trait implemented by every fitness check.

use std::path::PathBuf;

use crate::graph::GraphError;
use crate::pattern::PatternError;
use crate::policy::Policy;
use crate::types::Violation;

/// Failure while executing a single check.
///
/// The runner records it against the check and carries on with the rest.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Building the module graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A per-edge pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A content pattern failed to compile.
    #[error("invalid content pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A directory could not be walked.
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walker error.
        source: walkdir::Error,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
}

impl CheckError {
    /// Wraps a walker error for `path`.
    #[must_use]
    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}

/// An independent fitness check.
///
/// Checks only read the filesystem and the policy; they share no mutable
/// state with each other.
pub trait Check: Send + Sync {
    /// Unique name (used by `--only`/`--skip`).
    fn name(&self) -> &'static str;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns error if the check cannot complete.
    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError>;
}

/// Boxed check for dynamic dispatch.
pub type CheckBox = Box<dyn Check>;
