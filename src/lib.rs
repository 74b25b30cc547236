/*!
 * ctxcat - Concatenate text files into a single labeled stream for LLM context
 *
 * Walks input paths, drops binary files, applies include/exclude globs,
 * asks before adding oversized files, and produces one text body with a
 * token estimate checked against known model context windows.
 */

pub mod app;
pub mod classifier;
pub mod clipboard;
pub mod concat;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod tokenizer;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use app::{run, RunOutcome};
pub use concat::{Concatenator, OutputRecord};
pub use config::{Args, Config};
pub use error::{CtxError, Result};
pub use gate::{GateState, Prompter, ScriptedPrompter, SizeGate, StdinPrompter};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use types::{Candidate, SelectionResult};
pub use utils::format_file_size;
