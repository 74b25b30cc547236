/*!
 * Utility functions for ctxcat
 */

use std::path::{Component, Path};

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Render a path with `/` separators regardless of platform
pub fn slash_path(path: &Path) -> String {
    let mut out = String::new();
    let mut needs_separator = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy());
                needs_separator = false;
            }
            Component::RootDir => {
                out.push('/');
                needs_separator = false;
            }
            other => {
                if needs_separator {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
                needs_separator = true;
            }
        }
    }

    out
}

/// Directory names never descended into
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Dependencies
        "node_modules",
        "bower_components",
        // Build & Dist
        "target",
        "dist",
        "build",
        "out",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".venv",
        "venv",
        // JavaScript/TypeScript
        ".next",
        ".nuxt",
        "coverage",
        // IDEs & Tools
        ".gradle",
        ".idea",
        ".vscode",
        ".cache",
        ".terraform",
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_000_000), "2.0M");
    }

    #[test]
    fn test_slash_path() {
        assert_eq!(slash_path(&PathBuf::from("src/lib.rs")), "src/lib.rs");
        assert_eq!(slash_path(&PathBuf::from("../a/b.md")), "../a/b.md");
    }

    #[test]
    fn test_slash_path_roots() {
        assert_eq!(slash_path(&PathBuf::from("/")), "/");
        assert_eq!(slash_path(&PathBuf::from("/work/a.md")), "/work/a.md");
        assert_eq!(slash_path(&PathBuf::from("//work//a.md")), "/work/a.md");
    }

    #[cfg(windows)]
    #[test]
    fn test_slash_path_windows_prefix() {
        assert_eq!(slash_path(&PathBuf::from(r"C:\work\a.md")), "C:/work/a.md");
        assert_eq!(slash_path(&PathBuf::from(r"C:\")), "C:/");
        assert_eq!(slash_path(&PathBuf::from("C:a.md")), "C:a.md");
    }
}
