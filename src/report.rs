/*!
 * Reporting functionality for ctxcat
 *
 * Renders the run summary (file tree, counts, size, token estimate and the
 * per-model fit table) for the diagnostic stream, using the tabled library
 * for table layout.
 */

use std::collections::BTreeMap;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::tokenizer::FitVerdict;
use crate::utils::{format_file_size, format_number};

/// Everything the summary needs to know about a run
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Display paths of included files, in output order
    pub included: Vec<String>,
    /// Display paths of files the operator skipped
    pub skipped: Vec<String>,
    /// Display paths of files never evaluated after a stop
    pub unprocessed: Vec<String>,
    /// Number of candidates classified as binary
    pub binary_excluded: usize,
    /// Number of text files dropped by include/exclude patterns
    pub filtered_out: usize,
    /// Output size in bytes
    pub bytes: usize,
    /// Estimated tokens of the output
    pub tokens: usize,
    /// Where the body went
    pub destinations: Vec<String>,
    /// Fit verdicts per model
    pub fits: Vec<FitVerdict>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout for the body
    pub fn print_report(&self, report: &ScanReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📄 Files Included",
                value: format_number(report.included.len()),
            },
            SummaryRow {
                key: "⏭️ Files Skipped",
                value: format_number(report.skipped.len()),
            },
        ];

        if !report.unprocessed.is_empty() {
            rows.push(SummaryRow {
                key: "⛔ Not Processed",
                value: format_number(report.unprocessed.len()),
            });
        }

        rows.push(SummaryRow {
            key: "🧱 Binary Excluded",
            value: format_number(report.binary_excluded),
        });
        rows.push(SummaryRow {
            key: "🔍 Filtered Out",
            value: format_number(report.filtered_out),
        });
        rows.push(SummaryRow {
            key: "💾 Output Size",
            value: format_file_size(report.bytes as u64),
        });
        rows.push(SummaryRow {
            key: "📦 LLM Tokens",
            value: format!("{} tokens (estimated)", format_number(report.tokens)),
        });
        rows.push(SummaryRow {
            key: "📂 Output",
            value: report.destinations.join(", "),
        });

        styled(Table::new(rows))
    }

    fn create_fit_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FitRow {
            #[tabled(rename = "Model")]
            model: String,

            #[tabled(rename = "Context Limit")]
            limit: String,

            #[tabled(rename = "Fits")]
            fits: &'static str,
        }

        let rows: Vec<FitRow> = report
            .fits
            .iter()
            .map(|verdict| FitRow {
                model: verdict.model.to_string(),
                limit: format_number(verdict.limit),
                fits: if verdict.fits { "✅" } else { "❌" },
            })
            .collect();

        styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let mut out = String::new();

        out.push_str("📋  INCLUDED FILES\n");
        if report.included.is_empty() {
            out.push_str("(none)\n");
        } else {
            out.push_str(&render_tree(&report.included));
        }

        if !report.skipped.is_empty() {
            out.push_str("\n⏭️  SKIPPED\n");
            for path in &report.skipped {
                out.push_str(&format!("  {}\n", path));
            }
        }

        if !report.unprocessed.is_empty() {
            out.push_str("\n⛔  NOT PROCESSED (stopped by operator)\n");
            for path in &report.unprocessed {
                out.push_str(&format!("  {}\n", path));
            }
        }

        format!(
            "{}\n✅  CONCATENATION COMPLETE\n{}\n\n🧠  MODEL FIT\n{}",
            out,
            self.create_summary_table(report),
            self.create_fit_table(report)
        )
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}

#[derive(Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
}

/// Render `/`-separated paths as an indented tree
pub fn render_tree(paths: &[String]) -> String {
    let mut root = TreeNode::default();
    for path in paths {
        let mut node = &mut root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            node = node.children.entry(part.to_string()).or_default();
        }
    }

    let mut out = String::new();
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(name);
        out.push('\n');

        let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(child, &next, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::fit_verdicts;

    #[test]
    fn test_render_tree() {
        let tree = render_tree(&[
            "src/main.rs".to_string(),
            "src/util/mod.rs".to_string(),
            "README.md".to_string(),
        ]);
        assert_eq!(
            tree,
            "├── README.md\n└── src\n    ├── main.rs\n    └── util\n        └── mod.rs\n"
        );
    }

    #[test]
    fn test_console_report_sections() {
        let report = ScanReport {
            included: vec!["a.ts".to_string()],
            skipped: vec!["big.log".to_string()],
            unprocessed: vec!["later.txt".to_string()],
            binary_excluded: 2,
            filtered_out: 1,
            bytes: 34,
            tokens: 10,
            destinations: vec!["stdout".to_string()],
            fits: fit_verdicts(10),
        };

        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(text.contains("└── a.ts"));
        assert!(text.contains("big.log"));
        assert!(text.contains("NOT PROCESSED"));
        assert!(text.contains("later.txt"));
        assert!(text.contains("10 tokens (estimated)"));
        assert!(text.contains("GPT-4o"));
        assert!(text.contains("✅"));
        assert!(!text.contains("❌"));
    }

    #[test]
    fn test_report_without_files() {
        let report = ScanReport {
            fits: fit_verdicts(0),
            destinations: vec!["out.txt".to_string()],
            ..Default::default()
        };
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(text.contains("(none)"));
        assert!(!text.contains("SKIPPED"));
    }
}
