/*!
 * Concatenation of selected files into one labeled text stream
 */

use std::path::PathBuf;

use crate::error::{CtxError, Result};
use crate::filter::relative_display;
use crate::tokenizer::{estimate_tokens, fit_verdicts, read_lossy, FitVerdict};
use crate::types::Candidate;

/// Header line framing one file section
pub fn section_header(display_path: &str) -> String {
    format!("-- file: {} --", display_path)
}

/// The assembled output and its measurements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Concatenated body
    pub body: String,
    /// Display paths of the files in the body, in order
    pub files: Vec<String>,
    /// Body length in bytes
    pub bytes: usize,
    /// Estimated token count of the body
    pub tokens: usize,
}

impl OutputRecord {
    /// Fit verdicts of the body against every known model
    pub fn fit_verdicts(&self) -> Vec<FitVerdict> {
        fit_verdicts(self.tokens)
    }
}

/// Builds the output body from the final file set
pub struct Concatenator {
    base: PathBuf,
}

impl Concatenator {
    /// Create a concatenator that labels files relative to `base`
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Read every file in order and assemble the body.
    ///
    /// A file that cannot be read aborts the whole run: once selected its
    /// content is required.
    pub fn concatenate(&self, files: &[Candidate]) -> Result<OutputRecord> {
        let mut body = String::new();
        let mut names = Vec::with_capacity(files.len());

        for file in files {
            let content = read_lossy(&file.path).map_err(|source| CtxError::FileRead {
                path: file.path.clone(),
                source,
            })?;
            let display = relative_display(&file.path, &self.base);
            push_section(&mut body, &display, &content);
            names.push(display);
        }

        Ok(OutputRecord {
            bytes: body.len(),
            tokens: estimate_tokens(&body),
            files: names,
            body,
        })
    }
}

fn push_section(body: &mut String, display: &str, content: &str) {
    body.push_str(&section_header(display));
    body.push('\n');
    body.push_str(content.trim_end());
    body.push_str("\n\n");
}
