/*!
 * Output sinks for ctxcat: stdout, output file and clipboard
 */

use std::fs;
use std::io::Write;

use crate::clipboard;
use crate::concat::OutputRecord;
use crate::config::Config;
use crate::error::Result;

/// What happened at each sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkReport {
    /// Body written to stdout
    pub stdout: bool,
    /// Body written to the output file
    pub file: bool,
    /// Body delivered to the clipboard
    pub clipboard: bool,
}

impl SinkReport {
    /// Human-readable destinations for the summary
    pub fn destinations(&self, config: &Config) -> Vec<String> {
        let mut out = Vec::new();
        if self.stdout {
            out.push("stdout".to_string());
        }
        if let (true, Some(path)) = (self.file, &config.output_file) {
            out.push(path.display().to_string());
        }
        if self.clipboard {
            out.push("clipboard".to_string());
        } else if config.clip {
            out.push("clipboard (failed)".to_string());
        }
        out
    }
}

/// Routes the finished body to the configured sinks
pub struct OutputWriter {
    /// Writer configuration
    config: Config,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Deliver the body to every configured sink, using `stdout` as the
    /// standard output sink. The file is written only from a finished body.
    pub fn write_to<W: Write>(
        &self,
        record: &OutputRecord,
        stdout: &mut W,
    ) -> Result<SinkReport> {
        let mut report = SinkReport::default();

        if let Some(path) = &self.config.output_file {
            fs::write(path, &record.body)?;
            report.file = true;
        }

        if self.config.clip {
            match clipboard::copy_to_clipboard(&record.body) {
                Ok(()) => report.clipboard = true,
                Err(e) => log::warn!("Failed to copy to clipboard: {}", e),
            }
        }

        if self.config.writes_stdout() {
            stdout.write_all(record.body.as_bytes())?;
            stdout.flush()?;
            report.stdout = true;
        }

        Ok(report)
    }
}
