/*!
 * Text/binary classification of candidate files
 *
 * This is a heuristic. A known binary extension short-circuits to binary
 * without touching the file; otherwise the first `BINARY_SAMPLE_SIZE` bytes
 * are sampled and the file counts as binary when at least
 * `BINARY_ZERO_RATIO` of them are NUL bytes. Misclassifications are
 * possible and accepted.
 */

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use once_cell::sync::Lazy;

use crate::types::Candidate;

/// Number of leading bytes sampled for NUL detection
pub const BINARY_SAMPLE_SIZE: usize = 8000;

/// Fraction of NUL bytes in the sample at which a file is binary
pub const BINARY_ZERO_RATIO: f64 = 0.1;

/// Result of classifying a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Eligible for concatenation
    Text,
    /// Always excluded
    Binary,
}

static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Images
        "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tif", "tiff", "psd", "heic", "avif",
        // Audio
        "mp3", "wav", "ogg", "flac", "aac", "m4a", "wma",
        // Video
        "mp4", "avi", "mov", "mkv", "webm", "wmv", "flv", "m4v",
        // Archives
        "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "zst", "jar", "war",
        // Executables and objects
        "exe", "dll", "so", "dylib", "bin", "o", "a", "obj", "lib", "class", "wasm", "pyc",
        // Fonts
        "ttf", "otf", "woff", "woff2", "eot",
        // Documents
        "pdf",
    ]
    .into_iter()
    .collect()
});

/// Check an extension (without the dot) against the binary set, ignoring case
pub fn is_binary_extension(extension: &str) -> bool {
    BINARY_EXTENSIONS.contains(extension.to_lowercase().as_str())
}

/// Classify a candidate as text or binary
pub fn classify(candidate: &Candidate) -> FileClass {
    if is_binary_extension(&candidate.extension) {
        return FileClass::Binary;
    }

    match sample_is_binary(&candidate.path) {
        Ok(true) => FileClass::Binary,
        Ok(false) => FileClass::Text,
        Err(e) => {
            // Unreadable files fail closed
            log::debug!(
                "Treating {} as binary, sample failed: {}",
                candidate.path.display(),
                e
            );
            FileClass::Binary
        }
    }
}

fn sample_is_binary(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let mut buffer = Vec::with_capacity(BINARY_SAMPLE_SIZE);
    file.take(BINARY_SAMPLE_SIZE as u64).read_to_end(&mut buffer)?;
    Ok(is_binary_sample(&buffer))
}

/// Apply the NUL-ratio rule to an in-memory sample
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    let zeros = sample.iter().filter(|&&b| b == 0).count();
    zeros as f64 / sample.len() as f64 >= BINARY_ZERO_RATIO
}
