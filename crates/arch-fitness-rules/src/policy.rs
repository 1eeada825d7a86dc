//! Assembles the run's [`Policy`] from built-in data and configuration.

use std::path::Path;

use arch_fitness_core::policy::{compile_patterns, load_forbidden};
use arch_fitness_core::{
    Config, DomainBoundaryRule, ModulePath, NonDomainModules, PathPattern, Policy, PolicyError, RuleRegistry,
    ScanSettings, Severity,
};
use tracing::debug;

use crate::categories::compile_categories;
use crate::defaults::{GATEWAY_SURFACE, NON_DOMAIN_MODULES, ORPHAN_EXEMPTIONS};

/// Builds the policy for `project_dir`.
///
/// Order of the registry: built-in categories (unless `policy.builtin` is
/// false), `[[forbidden]]` rules, then `domain-module-boundary`.
/// `[rules.<name>]` overrides are applied last.
///
/// # Errors
///
/// Returns the first invalid pattern, severity or override. Nothing is
/// scanned before this succeeds.
pub fn build_policy(config: &Config, project_dir: &Path) -> Result<Policy, PolicyError> {
    // `./src`, `src/` and `src` all name the same directory; `{root}` and
    // graph paths use the normalized form.
    let root = ModulePath::normalize(&config.analyzer.root).ok_or_else(|| PolicyError::Invalid {
        context: "analyzer.root".to_string(),
        message: "must name a directory inside the project".to_string(),
    })?;
    let root = root.as_str();

    let mut categories = if config.policy.builtin {
        compile_categories(root)?
    } else {
        Vec::new()
    };
    if !config.forbidden.is_empty() {
        categories.push(load_forbidden(&config.forbidden, root)?);
    }

    let non_domain = match &config.policy.non_domain_modules {
        Some(names) => NonDomainModules::new(names.iter().cloned()),
        None => NonDomainModules::new(NON_DOMAIN_MODULES.iter().copied()),
    }
    .map_err(|e| PolicyError::Pattern {
        context: "policy.non_domain_modules".to_string(),
        source: e,
    })?;

    let gateway = PathPattern::with_root(
        config.policy.gateway.as_deref().unwrap_or(GATEWAY_SURFACE),
        root,
    )
    .map_err(|e| PolicyError::Pattern {
        context: "policy.gateway".to_string(),
        source: e,
    })?;

    let boundary = DomainBoundaryRule::new(root, &non_domain, gateway, Severity::Error).map_err(|e| {
        PolicyError::Pattern {
            context: DomainBoundaryRule::NAME.to_string(),
            source: e,
        }
    })?;

    let registry = RuleRegistry::compose(categories, Some(boundary))?.with_overrides(&config.rules)?;

    let orphan_exemptions = match &config.policy.orphan_exempt {
        Some(patterns) => compile_patterns(patterns, "policy.orphan_exempt", root)?,
        None => compile_patterns(ORPHAN_EXEMPTIONS, "policy.orphan_exempt", root)?,
    };

    let scan = ScanSettings::new(project_dir, root)
        .with_extensions(&config.analyzer.extensions)
        .with_excludes(&config.analyzer.exclude)?
        .with_base_url(Some(config.analyzer.base_url.as_deref().unwrap_or("")))
        .respect_gitignore(config.analyzer.respect_gitignore);

    debug!(
        "Policy: {} rules, {} non-domain modules, {} orphan exemptions",
        registry.len(),
        non_domain.names().len(),
        orphan_exemptions.len()
    );

    Policy::new(
        registry,
        non_domain,
        orphan_exemptions,
        scan,
        config.analyzer.layer_depth,
        config.fail_on(),
    )
}
