//! Built-in forbidden-dependency rules, one list per component category.
//!
//! Each list is plain data and compiles on its own, so a category can be
//! tested in isolation before [`compile_categories`] hands the lists to
//! `RuleRegistry::compose`.

use arch_fitness_core::{compile_all, RegisteredRule, RegistryError, RuleCategory, RuleTemplate};

mod aggregator;
mod app_service;
mod assembler;
mod common;
mod converter;
mod layering;
mod mapper;
mod repository;
mod service;
mod transaction_script;

pub use common::{orphan_rule, ORPHAN_RULE};

pub(crate) const AGGREGATOR: &str = r"\.aggregator\.ts$";
pub(crate) const APP_SERVICE: &str = r"\.app-service\.ts$";
pub(crate) const ASSEMBLER: &str = r"\.assembler\.ts$";
pub(crate) const CONVERTER: &str = r"\.converter\.ts$";
pub(crate) const MAPPER: &str = r"\.mapper\.ts$";
pub(crate) const REPOSITORY: &str = r"\.repository\.ts$";
pub(crate) const SERVICE: &str = r"\.service\.ts$";
/// Domain services and app-services.
pub(crate) const ANY_SERVICE: &str = r"\.(app-)?service\.ts$";
pub(crate) const TRANSACTION_SCRIPT: &str = r"\.transaction-script\.ts$";
pub(crate) const CONTROLLER: &str = r"\.controller\.ts$";
pub(crate) const APP_LAYER: &str = "^{root}/[^/]+/apps/";
pub(crate) const DOMAIN_LAYER: &str = "^{root}/[^/]+/domain/";
pub(crate) const SPEC_FILE: &str = r"\.(spec|test)\.[cm]?[jt]sx?$";

/// A named, uncompiled category list.
#[derive(Debug, Clone, Copy)]
pub struct CategoryList {
    /// Category name.
    pub name: &'static str,
    /// Rules in declaration order.
    pub rules: &'static [RuleTemplate],
}

/// Every built-in category in registry order. `common` also carries the
/// orphan rule, added by [`compile_categories`].
pub const CATEGORIES: &[CategoryList] = &[
    CategoryList {
        name: "aggregator",
        rules: aggregator::RULES,
    },
    CategoryList {
        name: "app-service",
        rules: app_service::RULES,
    },
    CategoryList {
        name: "assembler",
        rules: assembler::RULES,
    },
    CategoryList {
        name: "converter",
        rules: converter::RULES,
    },
    CategoryList {
        name: "mapper",
        rules: mapper::RULES,
    },
    CategoryList {
        name: "repository",
        rules: repository::RULES,
    },
    CategoryList {
        name: "service",
        rules: service::RULES,
    },
    CategoryList {
        name: "transaction-script",
        rules: transaction_script::RULES,
    },
    CategoryList {
        name: "layering",
        rules: layering::RULES,
    },
    CategoryList {
        name: "common",
        rules: common::RULES,
    },
];

/// Compiles every built-in category against `root`.
///
/// # Errors
///
/// Returns error if a built-in pattern fails to compile.
pub fn compile_categories(root: &str) -> Result<Vec<RuleCategory>, RegistryError> {
    CATEGORIES
        .iter()
        .map(|list| {
            let mut rules = compile_all(list.rules, root)?;
            if list.name == "common" {
                rules.push(RegisteredRule::Orphan(orphan_rule()));
            }
            Ok(RuleCategory::new(list.name, rules))
        })
        .collect()
}
