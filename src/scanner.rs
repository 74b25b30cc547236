/*!
 * File selection pipeline: resolve, classify, filter, gate
 *
 * Stages run strictly in sequence on a single thread; the size gate needs
 * one-at-a-time decisions in resolution order.
 */

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::classifier::{classify, FileClass};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{base_directory, PatternFilter};
use crate::gate::{Prompter, SizeGate};
use crate::resolver::resolve_paths;
use crate::types::{Candidate, SelectionResult};

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Number of files found by traversal
    pub candidates: usize,
    /// Candidates classified as binary
    pub binary_excluded: usize,
    /// Text files dropped by include/exclude patterns
    pub filtered_out: usize,
}

/// Runs the selection stages for one configuration
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Base directory for relative paths
    base: PathBuf,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Scanner statistics
    statistics: ScanStatistics,
}

impl Scanner {
    /// Create a new scanner, computing the base directory from the inputs
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let base = base_directory(&config.paths)?;
        Ok(Self::with_base(config, base, progress))
    }

    /// Create a scanner with an explicit base directory
    pub fn with_base(config: Config, base: PathBuf, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            base,
            progress,
            statistics: ScanStatistics::default(),
        }
    }

    /// Base directory used for pattern matching and display
    pub fn base(&self) -> &PathBuf {
        &self.base
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScanStatistics {
        self.statistics.clone()
    }

    /// Run all selection stages and return the gated selection
    pub fn scan<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<SelectionResult> {
        self.progress.set_prefix("📂 Resolving");
        let mut paths = resolve_paths(&self.config.paths)?;
        self.statistics.candidates = paths.len();
        self.drop_own_output(&mut paths);
        self.progress.set_length(paths.len() as u64);

        self.progress.set_prefix("🔎 Classifying");
        let text_files = self.classify_all(paths);

        let filter = PatternFilter::new(
            self.config.include_patterns.clone(),
            self.config.exclude_patterns.clone(),
            self.base.clone(),
        );
        let (kept, dropped) = filter.apply(text_files);
        self.statistics.filtered_out += dropped.len();
        log::debug!(
            "{} text files kept, {} filtered out",
            kept.len(),
            dropped.len()
        );

        self.progress.set_prefix("📏 Checking sizes");
        let mut gate = SizeGate::new(self.config.max_size, self.config.auto_confirm);
        let base = self.base.clone();
        let selection = self
            .progress
            .suspend(|| gate.run(kept, &base, prompter));

        Ok(selection)
    }

    // A previous run's output file must not feed back into the body
    fn drop_own_output(&mut self, paths: &mut Vec<PathBuf>) {
        let Some(output) = &self.config.output_file else {
            return;
        };
        let Ok(output) = fs::canonicalize(output) else {
            return;
        };
        let before = paths.len();
        paths.retain(|path| path != &output);
        if paths.len() < before {
            log::debug!("Skipping output file {}", output.display());
            self.statistics.filtered_out += 1;
        }
    }

    fn classify_all(&mut self, paths: Vec<PathBuf>) -> Vec<Candidate> {
        let mut text_files = Vec::with_capacity(paths.len());

        for path in paths {
            self.progress.inc(1);
            self.progress.set_message(display_name(&path));

            let candidate = match Candidate::from_path(path) {
                Ok(candidate) => candidate,
                Err(e) => {
                    // Vanished or unreadable: fail closed like the classifier
                    log::debug!("Excluding unreadable candidate: {}", e);
                    self.statistics.binary_excluded += 1;
                    continue;
                }
            };
            match classify(&candidate) {
                FileClass::Text => text_files.push(candidate),
                FileClass::Binary => {
                    log::debug!("Excluding binary file {}", candidate.path.display());
                    self.statistics.binary_excluded += 1;
                }
            }
        }

        text_files
    }
}

// Truncate long names to avoid display issues
fn display_name(path: &std::path::Path) -> String {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    if file_name.chars().count() > 40 {
        let tail: String = file_name
            .chars()
            .rev()
            .take(37)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    } else {
        file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_truncates() {
        let long = "a".repeat(60) + ".rs";
        let shown = display_name(&PathBuf::from("/x").join(&long));
        assert!(shown.starts_with("..."));
        assert_eq!(shown.chars().count(), 40);
        assert_eq!(display_name(&PathBuf::from("/x/short.rs")), "short.rs");
    }
}
