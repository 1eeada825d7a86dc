//! Init command implementation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// File written by `init`.
const CONFIG_FILE: &str = "arch-fitness.toml";

const TEMPLATE: &str = r#"# arch-fitness configuration

# Lowest severity that fails `arch-fitness check`: "error", "warn" or "info".
fail_on = "info"

[analyzer]
# Source root; `{root}` in patterns expands to it.
root = "src"

# Scanned file extensions.
extensions = ["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"]

# Glob patterns (relative to the project) left out of the module graph.
exclude = [
    "**/__specs__/**",
    "**/__tests__/**",
    "**/*.spec.*",
    "**/*.test.*",
    "**/migrations/**",
    "**/node_modules/**",
    "**/*.d.ts",
]

# Directory non-relative imports are resolved against (tsconfig baseUrl).
# base_url = "."

# Depth below the root at which `domain` and `apps` directories live.
layer_depth = 2

respect_gitignore = true

[policy]
# Include the built-in category rules.
builtin = true

# Top-level modules exempt from domain-module boundaries.
# non_domain_modules = ["shared-kernel", "shared", "utils", "health", "middleware", "database", "test-utils", "audit-log"]

# Regular expression for files other modules may import.
# gateway = '(\.aggregator\.ts$|/aggregators/|\.port\.ts$|/ports/|\.module\.ts$)'

# Additional forbidden dependencies.
# [[forbidden]]
# name = "no-legacy-imports"
# severity = "error"
# comment = "The legacy folder is being removed"
# from = { path = "^{root}/", path_not = ['^{root}/legacy/'] }
# to = { path = "^{root}/legacy/" }

# Per-rule overrides (see `arch-fitness list-rules`).
# [rules.no-orphans]
# enabled = false
#
# [rules.domain-module-boundary]
# severity = "warn"
"#;

/// Writes the template into the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = write_template(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Adjust [analyzer] to match the project layout");
    println!("  2. Run: arch-fitness check");

    Ok(())
}

fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_fitness_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn template_parses_to_defaults() {
        let config = Config::parse(TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.fail_on(), Severity::Info);
        assert_eq!(config.analyzer.root, defaults.analyzer.root);
        assert_eq!(config.analyzer.exclude, defaults.analyzer.exclude);
        assert_eq!(config.analyzer.extensions, defaults.analyzer.extensions);
        assert!(config.forbidden.is_empty());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "# mine\n").unwrap();

        assert!(write_template(tmp.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(), "# mine\n");

        write_template(tmp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(), TEMPLATE);
    }
}
