//! Locates the configuration file for a project.
//!
//! Resolution order:
//!
//! 1. `--config` flag (trusted as-is)
//! 2. `{project}/arch-fitness.toml`, then `{project}/.arch-fitness.toml`
//! 3. `$ARCH_FITNESS_CONFIG_DIR/config.toml`, or `~/.arch-fitness/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arch_fitness_core::{Config, PolicyError};
use tracing::{debug, info};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the file to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No configuration file found, using built-in defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using global config: {}", path.display());
        } else {
            debug!("Using config: {}", path.display());
        }
        Config::from_file(path)
            .map_err(PolicyError::from)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level file names, in priority order.
const PROJECT_FILES: &[&str] = &["arch-fitness.toml", ".arch-fitness.toml"];

/// File name inside the global directory.
const GLOBAL_FILE: &str = "config.toml";

/// Environment variable overriding the global directory.
const GLOBAL_DIR_ENV: &str = "ARCH_FITNESS_CONFIG_DIR";

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(project_dir, explicit, global_dir().as_deref())
}

fn resolve_with(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
    {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_FILE))
        .filter(|p| p.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// `$ARCH_FITNESS_CONFIG_DIR`, else `~/.arch-fitness`.
fn global_dir() -> Option<PathBuf> {
    match std::env::var_os(GLOBAL_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".arch-fitness")),
    }
}
