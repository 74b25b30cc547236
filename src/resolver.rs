/*!
 * Path resolution: expand input paths into an ordered list of candidate files
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::bail;
use crate::error::Result;
use crate::utils::DEFAULT_IGNORE;

/// Check whether a directory name belongs to the fixed ignore set
pub fn is_ignored_dir(name: &str) -> bool {
    DEFAULT_IGNORE.iter().any(|&ignored| ignored == name)
}

/// Expand every input into absolute file paths.
///
/// Each input is sorted on its own and the per-input lists are concatenated
/// in the order the inputs were given. A path reachable from two inputs is
/// kept at its first position. Any missing input aborts the whole resolution.
pub fn resolve_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    // Check every input up front so a missing one produces no partial results
    for input in inputs {
        if !input.exists() {
            bail!(PathNotFound, "{}", input.display());
        }
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for input in inputs {
        for path in resolve_input(input)? {
            if seen.insert(path.clone()) {
                resolved.push(path);
            }
        }
    }

    log::debug!("Resolved {} candidate files", resolved.len());
    Ok(resolved)
}

/// Expand a single input into a sorted list of absolute file paths
pub fn resolve_input(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        bail!(PathNotFound, "{}", input.display());
    }

    let root = fs::canonicalize(input)?;

    // A file given directly bypasses the ignore set
    if root.is_file() {
        return Ok(vec![root]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_ignored_entry(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.path().is_file())
        .map(|e| e.into_path())
        .collect();

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

fn is_ignored_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && is_ignored_dir(&entry.file_name().to_string_lossy())
}
