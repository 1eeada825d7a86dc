//! The validated, immutable policy a run is evaluated against.
//!
//! A [`Policy`] is assembled once at startup (see `arch-fitness-rules`) and
//! passed by reference to every check. Nothing in it changes afterwards.

mod loader;

pub use loader::{compile_patterns, load_forbidden, parse_severity, FORBIDDEN_CATEGORY};

use miette::Diagnostic;

use crate::boundary::NonDomainModules;
use crate::config::ConfigError;
use crate::graph::{GraphError, ScanSettings};
use crate::pattern::{PathPattern, PatternError};
use crate::rule::{RegistryError, RuleRegistry};
use crate::types::Severity;

/// Configuration or policy error, raised before any scanning.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum PolicyError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    #[diagnostic(code(arch_fitness::config))]
    Config(#[from] ConfigError),

    /// A pattern failed to compile.
    #[error("{context}: {source}")]
    #[diagnostic(
        code(arch_fitness::pattern),
        help("patterns are regular expressions over project-relative paths; `{{root}}` expands to the source root")
    )]
    Pattern {
        /// Where the pattern was declared (e.g. `forbidden[0].from.path`).
        context: String,
        /// Compiler diagnostic.
        source: PatternError,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`")]
    #[diagnostic(code(arch_fitness::severity), help("expected one of: error, warn, info"))]
    UnknownSeverity {
        /// Where the severity was declared.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Registry composition failed.
    #[error(transparent)]
    #[diagnostic(
        code(arch_fitness::registry),
        help("rule names must be unique and `[rules.<name>]` must name an existing rule; run `arch-fitness list-rules`")
    )]
    Registry(#[from] RegistryError),

    /// The analyzer settings are invalid.
    #[error("invalid [analyzer] settings: {0}")]
    #[diagnostic(code(arch_fitness::analyzer))]
    Analyzer(#[from] GraphError),

    /// A value is out of range.
    #[error("{context}: {message}")]
    #[diagnostic(code(arch_fitness::invalid))]
    Invalid {
        /// Offending key.
        context: String,
        /// What is wrong.
        message: String,
    },

    /// `--only`/`--skip` named a check that does not exist.
    #[error("unknown check `{name}`")]
    #[diagnostic(code(arch_fitness::check), help("available checks: {available}"))]
    UnknownCheck {
        /// Requested name.
        name: String,
        /// Comma-separated list of known checks.
        available: String,
    },
}

/// Everything a run needs, validated.
#[derive(Debug, Clone)]
pub struct Policy {
    registry: RuleRegistry,
    non_domain: NonDomainModules,
    orphan_exemptions: Vec<PathPattern>,
    scan: ScanSettings,
    layer_depth: usize,
    fail_on: Severity,
}

impl Policy {
    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns error if `layer_depth` is zero.
    pub fn new(
        registry: RuleRegistry,
        non_domain: NonDomainModules,
        orphan_exemptions: Vec<PathPattern>,
        scan: ScanSettings,
        layer_depth: usize,
        fail_on: Severity,
    ) -> Result<Self, PolicyError> {
        if layer_depth == 0 {
            return Err(PolicyError::Invalid {
                context: "analyzer.layer_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            registry,
            non_domain,
            orphan_exemptions,
            scan,
            layer_depth,
            fail_on,
        })
    }

    /// Source root (e.g. `src`).
    #[must_use]
    pub fn root(&self) -> &str {
        self.scan.root()
    }

    /// The composed rule registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Top-level modules exempt from boundary enforcement.
    #[must_use]
    pub fn non_domain(&self) -> &NonDomainModules {
        &self.non_domain
    }

    /// Patterns marking nodes the orphan rule skips.
    #[must_use]
    pub fn orphan_exemptions(&self) -> &[PathPattern] {
        &self.orphan_exemptions
    }

    /// Scanning and resolution settings.
    #[must_use]
    pub fn scan(&self) -> &ScanSettings {
        &self.scan
    }

    /// Depth under the root at which `domain`/`apps` directories live.
    #[must_use]
    pub fn layer_depth(&self) -> usize {
        self.layer_depth
    }

    /// Lowest severity that fails the run.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on
    }
}
