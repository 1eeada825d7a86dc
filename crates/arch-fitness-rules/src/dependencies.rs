//! The graph check: builds the module graph and evaluates the registry.

use arch_fitness_core::{evaluate, Check, CheckError, ModuleGraphBuilder, Policy, Violation};

/// Check name.
pub const NAME: &str = "dependency-rules";

/// Runs every forbidden-dependency rule, the domain boundary rule and the
/// orphan rule over the project's import graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyRules;

impl Check for DependencyRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbidden dependencies, domain module boundaries and orphan modules"
    }

    fn run(&self, policy: &Policy) -> Result<Vec<Violation>, CheckError> {
        let graph = ModuleGraphBuilder::new(policy.scan(), policy.orphan_exemptions())?.build()?;
        Ok(evaluate(&graph, policy.registry())?)
    }
}
