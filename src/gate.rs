/*!
 * Size gate: interactive confirmation for files above the size threshold
 *
 * The gate walks candidates strictly in order and threads a `GateState`
 * through them. `AutoInclude` and `Stopped` are sticky for the rest of the
 * run; once `Stopped`, no further candidate is evaluated.
 */

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::filter::relative_display;
use crate::tokenizer::estimate_file_tokens;
use crate::types::{Candidate, SelectionResult};
use crate::utils::format_file_size;

/// Confirmation protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Ask about every oversized file
    #[default]
    Normal,
    /// Include every remaining oversized file without asking
    AutoInclude,
    /// Stop evaluating candidates
    Stopped,
}

/// Operator answer to a confirmation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Include this file only
    Yes,
    /// Skip this file only
    No,
    /// Include this file and all remaining oversized files
    All,
    /// Skip this file and stop processing
    Stop,
}

impl Response {
    /// Parse an answer; anything unrecognized or missing means `No`
    pub fn parse(answer: Option<&str>) -> Self {
        let answer = answer.map(|a| a.trim().to_lowercase()).unwrap_or_default();
        match answer.as_str() {
            "y" | "yes" => Self::Yes,
            "a" | "all" => Self::All,
            "s" | "skip" => Self::Stop,
            _ => Self::No,
        }
    }
}

/// Source of operator answers
pub trait Prompter {
    /// Show a prompt and return the answer line, or `None` when no input is available
    fn ask(&mut self, message: &str) -> Option<String>;
}

/// Prompts on stderr and reads answers from stdin
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str) -> Option<String> {
        let mut stderr = io::stderr();
        // A prompt that fails to show still gets an answer read
        let _ = write!(stderr, "{}", message);
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                log::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

/// Replays canned answers and records the prompts it was shown
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Prompts shown so far
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front()
    }
}

/// Size gate for one run
#[derive(Debug, Clone)]
pub struct SizeGate {
    threshold: u64,
    auto_confirm: bool,
    state: GateState,
}

impl SizeGate {
    /// Create a gate; `auto_confirm` includes oversized files from the start
    pub fn new(threshold: u64, auto_confirm: bool) -> Self {
        Self {
            threshold,
            auto_confirm,
            state: GateState::Normal,
        }
    }

    /// Current protocol state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Run every candidate through the gate in order
    pub fn run<P: Prompter + ?Sized>(
        &mut self,
        candidates: Vec<Candidate>,
        base: &Path,
        prompter: &mut P,
    ) -> SelectionResult {
        let mut selection = SelectionResult::default();

        for candidate in candidates {
            if self.state == GateState::Stopped {
                selection.unprocessed.push(candidate.path);
                continue;
            }

            if self.admit(&candidate, base, prompter) {
                selection.included.push(candidate);
            } else {
                selection.skipped.push(candidate.path);
            }
        }

        if !selection.unprocessed.is_empty() {
            log::info!(
                "Stopped early, {} files not processed",
                selection.unprocessed.len()
            );
        }
        selection
    }

    /// Decide a single candidate, updating the state
    pub fn admit<P: Prompter + ?Sized>(
        &mut self,
        candidate: &Candidate,
        base: &Path,
        prompter: &mut P,
    ) -> bool {
        if candidate.size <= self.threshold {
            return true;
        }

        if self.auto_confirm {
            self.state = GateState::AutoInclude;
        }
        if self.state == GateState::AutoInclude {
            return true;
        }

        let message = confirmation_message(candidate, base);
        match Response::parse(prompter.ask(&message).as_deref()) {
            Response::Yes => true,
            Response::No => false,
            Response::All => {
                self.state = GateState::AutoInclude;
                true
            }
            Response::Stop => {
                self.state = GateState::Stopped;
                false
            }
        }
    }
}

fn confirmation_message(candidate: &Candidate, base: &Path) -> String {
    let tokens = estimate_file_tokens(&candidate.path, candidate.size);
    format!(
        "{} is {} (~{} tokens). Include it? [y]es/[n]o/[a]ll/[s]kip rest: ",
        relative_display(&candidate.path, base),
        format_file_size(candidate.size),
        tokens
    )
}
