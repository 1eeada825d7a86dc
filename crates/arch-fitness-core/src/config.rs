//! Configuration file types for arch-fitness.
//!
//! These are the raw TOML shapes. Patterns and severities inside
//! `[[forbidden]]` stay as strings here and are validated when the policy is
//! assembled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Top-level configuration (`arch-fitness.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lowest severity that fails the run (default: info).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Source scanning configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Built-in policy adjustments.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Additional forbidden-dependency rules.
    #[serde(default)]
    pub forbidden: Vec<ForbiddenRuleDto>,

    /// Per-rule overrides.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Effective failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Info)
    }
}

/// `[analyzer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Source root, relative to the project directory.
    #[serde(default = "default_root")]
    pub root: String,

    /// File extensions treated as source files.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns (project-relative) excluded from the graph.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Directory non-relative specifiers are resolved against
    /// (default: the project directory).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Depth under the root at which `domain`/`apps` directories live.
    #[serde(default = "default_layer_depth")]
    pub layer_depth: usize,

    /// Whether to respect `.gitignore` files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            base_url: None,
            layer_depth: default_layer_depth(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    crate::graph::DEFAULT_EXTENSIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_exclude() -> Vec<String> {
    [
        "**/__specs__/**",
        "**/__tests__/**",
        "**/*.spec.*",
        "**/*.test.*",
        "**/migrations/**",
        "**/node_modules/**",
        "**/*.d.ts",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_layer_depth() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// `[policy]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Include the built-in category rule lists.
    #[serde(default = "default_true")]
    pub builtin: bool,

    /// Replaces the built-in non-domain module list.
    #[serde(default)]
    pub non_domain_modules: Option<Vec<String>>,

    /// Replaces the built-in orphan exemption patterns.
    #[serde(default)]
    pub orphan_exempt: Option<Vec<String>>,

    /// Replaces the built-in gateway surface pattern.
    #[serde(default)]
    pub gateway: Option<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            non_domain_modules: None,
            orphan_exempt: None,
            gateway: None,
        }
    }
}

/// `[[forbidden]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForbiddenRuleDto {
    /// Unique rule name.
    pub name: String,
    /// Severity (default: "error").
    #[serde(default = "default_severity_str")]
    pub severity: String,
    /// Explanation shown with violations.
    #[serde(default)]
    pub comment: String,
    /// Source side.
    pub from: MatcherDto,
    /// Destination side.
    pub to: MatcherDto,
}

fn default_severity_str() -> String {
    "error".to_string()
}

/// `{ path, path_not }` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherDto {
    /// Include pattern.
    pub path: String,
    /// Exclude patterns.
    #[serde(default)]
    pub path_not: Vec<String>,
}

/// `[rules.<name>]` override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
