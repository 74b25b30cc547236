/*!
 * Core types and data structures for the ctxcat pipeline
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file discovered by traversal, not yet classified or filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Lowercased extension without the dot (empty when absent)
    pub extension: String,
}

impl Candidate {
    /// Build a candidate from an absolute path, reading its size from disk
    pub fn from_path(path: PathBuf) -> io::Result<Self> {
        let size = fs::metadata(&path)?.len();
        Ok(Self::new(path, size))
    }

    /// Build a candidate with a known size
    pub fn new(path: PathBuf, size: u64) -> Self {
        let extension = extension_of(&path);
        Self {
            path,
            size,
            extension,
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Outcome of the size gate: which files go into the output and which do not
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    /// Files to concatenate, in resolution order
    pub included: Vec<Candidate>,
    /// Files the operator declined
    pub skipped: Vec<PathBuf>,
    /// Files left unevaluated after the operator stopped the run
    pub unprocessed: Vec<PathBuf>,
}
