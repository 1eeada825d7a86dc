//! Locating layer directories (`domain`, `apps`) and walking their files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Name of domain-layer directories.
pub const DOMAIN_DIR: &str = "domain";
/// Name of application-layer directories.
pub const APPS_DIR: &str = "apps";

/// Finds directories literally named `name` exactly `depth` levels below
/// `source_dir` (`src/notes/domain` is depth 2 under `src`).
///
/// A missing `source_dir` yields an empty list.
///
/// # Errors
///
/// Returns error if a directory cannot be read.
pub fn layer_dirs(source_dir: &Path, depth: usize, name: &str) -> Result<Vec<PathBuf>, walkdir::Error> {
    if !source_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(depth)
        .max_depth(depth)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name() == name {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Lists every regular file under `dir`, sorted by path.
///
/// # Errors
///
/// Returns error if a directory cannot be read.
pub fn files_under(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Lists the regular files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns error if the directory cannot be read.
pub fn direct_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Finds directories named `name` at any depth below `dir`, sorted by path.
///
/// # Errors
///
/// Returns error if a directory cannot be read.
pub fn dirs_named(dir: &Path, name: &str) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name() == name {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Whether a `/`-separated path is a spec or test file, or lives in a
/// `__specs__`/`__tests__` directory.
#[must_use]
pub fn is_spec_path(path: &str) -> bool {
    let mut segments = path.split('/').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return segment.contains(".spec.") || segment.contains(".test.");
        }
        if segment == "__specs__" || segment == "__tests__" {
            return true;
        }
    }
    false
}

/// `path` relative to `base`, `/`-separated.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
