//! # arch-fitness-core
//!
//! Engine for architecture fitness checks over a TypeScript/JavaScript
//! source tree.
//!
//! The engine treats the inspected project as file paths plus raw import
//! references. It provides:
//!
//! - [`PathPattern`] / [`Matcher`]: include/exclude path predicates
//! - [`ModuleGraphBuilder`]: scans a source root into a [`ModuleGraph`]
//! - [`RuleRegistry`]: forbidden-dependency rules composed from category lists
//! - [`DomainBoundaryRule`]: cross-module imports only through gateway files
//! - [`evaluate`]: every rule against every edge, plus orphan detection
//! - [`Check`] / [`Runner`]: independent checks with partial-failure tolerance
//!
//! Built-in policy data lives in `arch-fitness-rules`.
//!
//! ## Example
//!
//! ```ignore
//! use arch_fitness_core::{evaluate, ModuleGraphBuilder};
//!
//! let graph = ModuleGraphBuilder::new(policy.scan(), policy.orphan_exemptions())?.build()?;
//! for violation in evaluate(&graph, policy.registry())? {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod boundary;
mod check;
mod config;
mod evaluator;
mod orphan;
mod pattern;
mod rule;
mod runner;
mod types;

/// Module graph construction.
pub mod graph;
/// Layer directory discovery helpers for filesystem checks.
pub mod layout;
/// Validated policy and its loading errors.
pub mod policy;

pub use boundary::{DomainBoundaryRule, NonDomainModules};
pub use check::{Check, CheckBox, CheckError};
pub use config::{AnalyzerConfig, Config, ConfigError, ForbiddenRuleDto, MatcherDto, PolicyConfig, RuleConfig};
pub use evaluator::evaluate;
pub use graph::{DependencyEdge, GraphError, ModuleGraph, ModuleGraphBuilder, ModulePath, Node, ScanSettings};
pub use orphan::detect_orphans;
pub use pattern::{expand_root, Matcher, PathPattern, PatternError, ROOT_PLACEHOLDER};
pub use policy::{Policy, PolicyError};
pub use rule::{
    compile_all, MatcherTemplate, OrphanRule, RegisteredRule, RegistryEntry, RegistryError, RuleCategory,
    RuleDefinition, RuleRegistry, RuleTemplate, DOMAIN_BOUNDARY_CATEGORY,
};
pub use runner::{CheckOutcome, RunReport, Runner};
pub use types::{count_by_severity, Location, Severity, Suggestion, Violation, ViolationKind};
