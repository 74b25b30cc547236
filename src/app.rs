/*!
 * One complete run: select, concatenate, deliver, summarize
 */

use std::io::Write;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::concat::{Concatenator, OutputRecord};
use crate::config::Config;
use crate::error::Result;
use crate::filter::relative_display;
use crate::gate::Prompter;
use crate::report::ScanReport;
use crate::scanner::Scanner;
use crate::types::SelectionResult;
use crate::writer::OutputWriter;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub selection: SelectionResult,
    pub record: OutputRecord,
    pub report: ScanReport,
}

/// Execute a run, writing the stdout sink to `stdout`.
///
/// Any fatal error returns before a sink is touched, so no partial output
/// file is ever written.
pub fn run<P, W>(
    config: &Config,
    prompter: &mut P,
    progress: Arc<ProgressBar>,
    stdout: &mut W,
) -> Result<RunOutcome>
where
    P: Prompter + ?Sized,
    W: Write,
{
    config.validate()?;

    let mut scanner = Scanner::new(config.clone(), progress)?;
    let selection = scanner.scan(prompter)?;
    let statistics = scanner.get_statistics();
    let base = scanner.base().clone();
    scanner.progress.finish_and_clear();

    let record = Concatenator::new(base.clone()).concatenate(&selection.included)?;
    let sinks = OutputWriter::new(config.clone()).write_to(&record, stdout)?;

    let display = |paths: &[std::path::PathBuf]| -> Vec<String> {
        paths.iter().map(|p| relative_display(p, &base)).collect()
    };

    let report = ScanReport {
        included: record.files.clone(),
        skipped: display(&selection.skipped),
        unprocessed: display(&selection.unprocessed),
        binary_excluded: statistics.binary_excluded,
        filtered_out: statistics.filtered_out,
        bytes: record.bytes,
        tokens: record.tokens,
        destinations: sinks.destinations(config),
        fits: record.fit_verdicts(),
    };

    Ok(RunOutcome {
        selection,
        record,
        report,
    })
}
