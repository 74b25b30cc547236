/*!
 * Include/exclude glob filtering relative to a base directory
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;

use crate::error::Result;
use crate::types::Candidate;
use crate::utils::slash_path;

/// Pick the directory that paths are made relative to.
///
/// A single directory input is its own base; anything else falls back to the
/// current working directory.
pub fn base_directory(inputs: &[PathBuf]) -> Result<PathBuf> {
    if let [only] = inputs {
        if only.is_dir() {
            return Ok(fs::canonicalize(only)?);
        }
    }
    let cwd = env::current_dir()?;
    Ok(fs::canonicalize(&cwd).unwrap_or(cwd))
}

/// Path of `path` relative to `base`, or `None` when no relative form exists
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(path, base).filter(|rel| !rel.as_os_str().is_empty())
}

/// Display form of a path: relative to `base` when possible, absolute otherwise
pub fn relative_display(path: &Path, base: &Path) -> String {
    match relative_path(path, base) {
        Some(rel) => slash_path(&rel),
        None => slash_path(path),
    }
}

/// Whitelist/blacklist glob filter
#[derive(Debug, Clone)]
pub struct PatternFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    base: PathBuf,
}

impl PatternFilter {
    /// Create a filter; empty pattern sets disable the corresponding stage
    pub fn new(include: Vec<String>, exclude: Vec<String>, base: PathBuf) -> Self {
        Self {
            include,
            exclude,
            base,
        }
    }

    /// Base directory the filter resolves relative paths against
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Check whether a candidate survives both pattern stages
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        let absolute = slash_path(&candidate.path);
        let relative = relative_path(&candidate.path, &self.base).map(|rel| slash_path(&rel));

        let relative = relative.as_deref();

        if !self.include.is_empty() && !matches_any(&self.include, relative, &absolute) {
            return false;
        }

        // Exclude wins over include
        !matches_any(&self.exclude, relative, &absolute)
    }

    /// Keep the candidates that pass, preserving order
    pub fn apply(&self, candidates: Vec<Candidate>) -> (Vec<Candidate>, Vec<Candidate>) {
        candidates.into_iter().partition(|c| self.accepts(c))
    }
}

fn matches_any(patterns: &[String], relative: Option<&str>, absolute: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern_matches(pattern, relative, absolute))
}

/// Absolute patterns are tested against the absolute path, all others against
/// the relative path. Without a relative form the absolute path is used.
fn pattern_matches(pattern: &str, relative: Option<&str>, absolute: &str) -> bool {
    match relative {
        Some(rel) if !pattern.starts_with('/') => glob_match(pattern, rel),
        _ => glob_match(pattern, absolute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rel: &str) -> Candidate {
        Candidate::new(PathBuf::from("/work/project").join(rel), 1)
    }

    fn filter(include: &[&str], exclude: &[&str]) -> PatternFilter {
        PatternFilter::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
            PathBuf::from("/work/project"),
        )
    }

    #[test]
    fn test_no_patterns_accepts_everything() {
        let f = filter(&[], &[]);
        assert!(f.accepts(&candidate("src/main.rs")));
        assert!(f.accepts(&candidate("README.md")));
    }

    #[test]
    fn test_include_is_default_reject() {
        let f = filter(&["src/**/*.rs"], &[]);
        assert!(f.accepts(&candidate("src/deep/mod/lib.rs")));
        assert!(!f.accepts(&candidate("README.md")));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let f = filter(&["*.md"], &[]);
        assert!(f.accepts(&candidate("README.md")));
        assert!(!f.accepts(&candidate("docs/guide.md")));
    }

    #[test]
    fn test_exclude_dominates_include() {
        let f = filter(&["**/*.ts"], &["**/*.ts"]);
        assert!(!f.accepts(&candidate("src/a.ts")));

        let f = filter(&["src/**"], &["src/gen/**"]);
        assert!(f.accepts(&candidate("src/app.ts")));
        assert!(!f.accepts(&candidate("src/gen/types.ts")));
    }

    #[test]
    fn test_character_classes() {
        let f = filter(&["file[0-9].txt"], &[]);
        assert!(f.accepts(&candidate("file3.txt")));
        assert!(!f.accepts(&candidate("fileA.txt")));
    }

    #[test]
    fn test_absolute_pattern_uses_absolute_path() {
        let f = filter(&["/work/project/src/**"], &[]);
        assert!(f.accepts(&candidate("src/main.rs")));
        assert!(!f.accepts(&candidate("tests/cli.rs")));
    }

    #[test]
    fn test_apply_preserves_order() {
        let f = filter(&[], &["*.lock"]);
        let (kept, dropped) = f.apply(vec![
            candidate("b.rs"),
            candidate("Cargo.lock"),
            candidate("a.rs"),
        ]);
        let kept: Vec<_> = kept
            .iter()
            .map(|c| relative_display(&c.path, f.base()))
            .collect();
        assert_eq!(kept, vec!["b.rs", "a.rs"]);
        assert_eq!(dropped.len(), 1);
    }

    #[test]
    fn test_relative_display_outside_base() {
        let base = PathBuf::from("/work/project");
        assert_eq!(
            relative_display(Path::new("/work/other/x.md"), &base),
            "../other/x.md"
        );
        assert_eq!(relative_display(Path::new("/work/project/a.ts"), &base), "a.ts");
    }
}
