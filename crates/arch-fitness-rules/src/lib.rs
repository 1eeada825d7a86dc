//! # arch-fitness-rules
//!
//! Built-in layered-architecture policy for arch-fitness.
//!
//! ## Dependency rules
//!
//! | Category | Rules |
//! |----------|-------|
//! | aggregator | `aggregators-no-other-aggregators`, `aggregators-no-app-layer` |
//! | app-service | `app-services-no-other-app-services`, `app-services-no-repositories` |
//! | assembler | `assemblers-no-services`, `assemblers-no-repositories` |
//! | converter | `converters-no-side-effects` |
//! | mapper | `mappers-no-services`, `mappers-no-repositories` |
//! | repository | `repositories-no-services`, `repositories-no-other-repositories` |
//! | service | `services-no-other-services`, `services-no-app-layer` |
//! | transaction-script | `transaction-scripts-no-other-transaction-scripts`, `transaction-scripts-no-app-services` |
//! | layering | `domain-no-app-layer`, `domain-no-infrastructure`, `controllers-only-from-app-layer` |
//! | common | `not-to-spec`, `not-to-migrations`, `no-orphans` |
//! | domain-boundary | `domain-module-boundary` |
//!
//! ## Checks
//!
//! | Name | Description |
//! |------|-------------|
//! | `dependency-rules` | Every rule above over the import graph |
//! | `no-dto-filename-in-domain` | No "dto" in domain file names |
//! | `no-dto-type-in-domain` | No `*Dto` declarations in domain sources |
//! | `no-types-folder` | No centralized `types` folders in the domain layer |
//! | `param-colocation` | `.param.`, `.command.` and `.projection.` files sit beside their consumer |
//! | `no-generic-type-files` | No `.type.` files in the domain layer |
//! | `dto-colocation` | No centralized `dtos`/`swagger` folders under actions |
//!
//! ## Usage
//!
//! ```ignore
//! use arch_fitness_core::{Config, Runner};
//! use arch_fitness_rules::{all_checks, build_policy};
//!
//! let policy = build_policy(&Config::default(), Path::new("."))?;
//! let report = Runner::new(all_checks()).run(&policy);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod categories;
mod defaults;
mod dependencies;
mod naming;
mod policy;

use arch_fitness_core::CheckBox;

pub use categories::{compile_categories, orphan_rule, CategoryList, CATEGORIES, ORPHAN_RULE};
pub use defaults::{GATEWAY_SURFACE, NON_DOMAIN_MODULES, ORPHAN_EXEMPTIONS};
pub use dependencies::DependencyRules;
pub use naming::{
    DtoColocation, NoDtoFilenameInDomain, NoDtoTypeInDomain, NoGenericTypeFiles, NoTypesFolder, ParamColocation,
};
pub use policy::build_policy;

/// Re-export core types for convenience.
pub use arch_fitness_core::{Check, Policy, Severity, Violation};

/// Returns every built-in check in execution order.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(DependencyRules),
        Box::new(NoDtoFilenameInDomain),
        Box::new(NoDtoTypeInDomain),
        Box::new(NoTypesFolder),
        Box::new(ParamColocation),
        Box::new(NoGenericTypeFiles),
        Box::new(DtoColocation),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn check_names_are_unique() {
        let checks = all_checks();
        let names: HashSet<&str> = checks.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), checks.len());
    }

    #[test]
    fn graph_check_runs_first() {
        assert_eq!(all_checks()[0].name(), "dependency-rules");
    }
}
