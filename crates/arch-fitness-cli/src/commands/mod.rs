//! Subcommand implementations.

pub mod check;
pub mod graph;
pub mod init;
pub mod list_rules;
pub mod output;

use std::path::Path;

use anyhow::Result;
use arch_fitness_core::{Config, Policy};
use arch_fitness_rules::build_policy;

/// Builds the policy for `path`. Errors stay [`arch_fitness_core::PolicyError`]s
/// so `main` can render them as diagnostics.
fn policy(path: &Path, config: &Config) -> Result<Policy> {
    Ok(build_policy(config, path)?)
}
