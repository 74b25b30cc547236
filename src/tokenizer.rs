/*!
 * Token estimation and model context-window fit checks
 *
 * There is no real tokenizer here: the estimate is `ceil(chars / 3.5)`,
 * computed in integer arithmetic so it is exact for every length.
 */

use std::fs;
use std::io;
use std::path::Path;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Estimate the token count of a text
pub fn estimate_tokens(text: &str) -> usize {
    estimate_tokens_for_chars(text.chars().count())
}

/// `ceil(chars / 3.5)` == `ceil(2 * chars / 7)`
pub fn estimate_tokens_for_chars(chars: usize) -> usize {
    (chars * 2).div_ceil(7)
}

/// Estimate the token count of a file's full content.
///
/// Falls back to the size-based estimate when the file cannot be read.
pub fn estimate_file_tokens(path: &Path, size: u64) -> usize {
    match read_lossy(path) {
        Ok(text) => estimate_tokens(&text),
        Err(_) => estimate_tokens_for_chars(size as usize),
    }
}

/// Read a file as UTF-8, replacing invalid sequences
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Models with known context windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum Model {
    #[strum(to_string = "GPT-3.5 Turbo")]
    Gpt35Turbo,

    #[strum(to_string = "GPT-4")]
    Gpt4,

    #[strum(to_string = "GPT-4 Turbo")]
    Gpt4Turbo,

    #[strum(to_string = "GPT-4o")]
    Gpt4o,

    #[strum(to_string = "Claude 3.5 Sonnet")]
    Sonnet35,

    #[strum(to_string = "Claude 3 Opus")]
    Opus3,

    #[strum(to_string = "Gemini 1.5 Pro")]
    Gemini15Pro,

    #[strum(to_string = "Llama 3 8B")]
    Llama3_8b,

    #[strum(to_string = "Mistral Large")]
    MistralLarge,
}

impl Model {
    /// Get the context window size for this model
    pub fn context_window(&self) -> usize {
        match self {
            Self::Gpt35Turbo => 16_385,
            Self::Gpt4 => 8_192,
            Self::Gpt4Turbo => 128_000,
            Self::Gpt4o => 128_000,
            Self::Sonnet35 => 200_000,
            Self::Opus3 => 200_000,
            Self::Gemini15Pro => 2_000_000,
            Self::Llama3_8b => 8_192,
            Self::MistralLarge => 128_000,
        }
    }

    /// Whether a token count fits strictly under the context window
    pub fn fits(&self, tokens: usize) -> bool {
        tokens < self.context_window()
    }
}

/// Fit verdict of an estimate against one model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitVerdict {
    pub model: Model,
    pub limit: usize,
    pub fits: bool,
}

/// Check an estimate against every known model
pub fn fit_verdicts(tokens: usize) -> Vec<FitVerdict> {
    Model::iter()
        .map(|model| FitVerdict {
            model,
            limit: model.context_window(),
            fits: model.fits(tokens),
        })
        .collect()
}
