//! Filesystem-only naming and colocation checks.
//!
//! These checks never look at the import graph. They walk the `domain` and
//! `apps` directories found at the policy's layer depth and inspect file
//! names, directory names and, for declared type names, file contents.

use std::path::{Path, PathBuf};

use arch_fitness_core::layout::{self, display_relative};
use arch_fitness_core::{CheckError, Policy};

mod dto_colocation;
mod no_dto_filename;
mod no_dto_type;
mod no_generic_type_files;
mod no_types_folder;
mod param_colocation;

pub use dto_colocation::DtoColocation;
pub use no_dto_filename::NoDtoFilenameInDomain;
pub use no_dto_type::NoDtoTypeInDomain;
pub use no_generic_type_files::NoGenericTypeFiles;
pub use no_types_folder::NoTypesFolder;
pub use param_colocation::ParamColocation;

/// A file found under a layer directory.
#[derive(Debug, Clone)]
pub(crate) struct LayerFile {
    /// Absolute (or cwd-relative) path for reading.
    pub path: PathBuf,
    /// Project-relative, `/`-separated path for reporting.
    pub relative: String,
}

impl LayerFile {
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }

    pub fn is_spec(&self) -> bool {
        layout::is_spec_path(&self.relative)
    }
}

/// Layer directories named `name` at the policy's layer depth.
pub(crate) fn layer_dirs(policy: &Policy, name: &str) -> Result<Vec<PathBuf>, CheckError> {
    let source_dir = policy.scan().source_dir();
    layout::layer_dirs(&source_dir, policy.layer_depth(), name)
        .map_err(|e| CheckError::walk(source_dir, e))
}

/// Every file below the domain directories, in path order.
pub(crate) fn domain_files(policy: &Policy) -> Result<Vec<LayerFile>, CheckError> {
    let mut files = Vec::new();
    for dir in layer_dirs(policy, layout::DOMAIN_DIR)? {
        for path in layout::files_under(&dir).map_err(|e| CheckError::walk(&dir, e))? {
            files.push(layer_file(policy, path));
        }
    }
    Ok(files)
}

/// Domain files with a scanned source extension.
pub(crate) fn domain_sources(policy: &Policy) -> Result<Vec<LayerFile>, CheckError> {
    Ok(domain_files(policy)?
        .into_iter()
        .filter(|f| policy.scan().is_source_file(f.file_name()))
        .collect())
}

pub(crate) fn layer_file(policy: &Policy, path: PathBuf) -> LayerFile {
    let relative = relative(policy, &path);
    LayerFile { path, relative }
}

pub(crate) fn relative(policy: &Policy, path: &Path) -> String {
    display_relative(path, policy.scan().project_dir())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    use arch_fitness_core::{Check, Config, Policy, Violation};
    use tempfile::TempDir;

    pub fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn policy(tmp: &TempDir) -> Policy {
        crate::build_policy(&Config::default(), tmp.path()).unwrap()
    }

    pub fn run(check: &dyn Check, tmp: &TempDir) -> Vec<Violation> {
        check.run(&policy(tmp)).unwrap()
    }

    pub fn files(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.location.file.as_str()).collect()
    }
}
