/*!
 * Configuration handling for ctxcat
 */

use std::path::PathBuf;

use clap::{Arg, ArgAction, Parser};
use clap_complete::Shell;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ensure;
use crate::error::Result;

/// Default size threshold above which files need confirmation
pub const DEFAULT_MAX_SIZE: &str = "100k";

static SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)(k|kb|m|mb)?$").expect("size pattern is a valid regex")
});

/// Parse a size such as `512`, `100k`, `2MB` into bytes
pub fn parse_size(input: &str) -> std::result::Result<u64, String> {
    let invalid = || format!("invalid size '{}', expected <integer>(k|kb|m|mb)", input);
    let caps = SIZE_PATTERN.captures(input.trim()).ok_or_else(invalid)?;

    let value: u64 = caps[1].parse().map_err(|_| invalid())?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("k") | Some("kb") => 1024,
        Some("m") | Some("mb") => 1024 * 1024,
        _ => 1,
    };

    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// Command-line arguments for ctxcat
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxcat",
    version = env!("CARGO_PKG_VERSION"),
    disable_version_flag = true,
    arg = Arg::new("version")
        .short('v')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version"),
    about = "Concatenate text files into a single labeled stream for LLM context",
    long_about = "Walks the given paths, skips binary files, applies include/exclude globs, \
                  asks before adding large files, and writes the concatenated result with a \
                  token estimate to stdout, a file or the clipboard."
)]
pub struct Args {
    /// Files or directories to concatenate
    #[clap(required_unless_present = "generate")]
    pub paths: Vec<String>,

    /// Write the result to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Only include files matching these glob patterns.
    ///
    /// Commas separate patterns, so brace alternatives such as `*.{rs,md}`
    /// must be passed as separate patterns. The flag takes every following
    /// value: list paths first or end the patterns with `--`.
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub include: Vec<String>,

    /// Exclude files matching these glob patterns.
    ///
    /// Same syntax as `--include`: no commas inside a pattern, and paths
    /// go before the flag or after `--`.
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Files above this size need confirmation (e.g. 500, 100k, 2mb)
    #[clap(
        long = "maxSize",
        visible_alias = "max-size",
        default_value = DEFAULT_MAX_SIZE,
        value_parser = parse_size
    )]
    pub max_size: u64,

    /// Include large files without asking
    #[clap(short = 'y', long)]
    pub yes: bool,

    /// Copy the result to the system clipboard
    #[clap(short, long)]
    pub copy: bool,

    /// Increase log verbosity (-V info, -VV debug)
    #[clap(short = 'V', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration, immutable for the run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Input files or directories, in the order given
    pub paths: Vec<PathBuf>,

    /// Output file path, if any
    pub output_file: Option<PathBuf>,

    /// Whitelist patterns (empty = no whitelist)
    pub include_patterns: Vec<String>,

    /// Blacklist patterns (empty = no blacklist)
    pub exclude_patterns: Vec<String>,

    /// Size threshold in bytes
    pub max_size: u64,

    /// Include oversized files without asking
    pub auto_confirm: bool,

    /// Copy output to clipboard
    pub clip: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            paths: args.paths.into_iter().map(PathBuf::from).collect(),
            output_file: args.output.map(PathBuf::from),
            include_patterns: non_empty(args.include),
            exclude_patterns: non_empty(args.exclude),
            max_size: args.max_size,
            auto_confirm: args.yes,
            clip: args.copy,
        }
    }

    /// Whether the body goes to stdout
    pub fn writes_stdout(&self) -> bool {
        self.output_file.is_none() && !self.clip
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.paths.is_empty(), InvalidArgument, "no input paths given");

        // Check if output file directory exists
        if let Some(output) = &self.output_file {
            if let Some(parent) = output.parent() {
                ensure!(
                    parent.as_os_str().is_empty() || parent.exists(),
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

fn non_empty(patterns: Vec<String>) -> Vec<String> {
    patterns
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512"), Ok(512));
        assert_eq!(parse_size("1k"), Ok(1024));
        assert_eq!(parse_size("100K"), Ok(102_400));
        assert_eq!(parse_size("3kb"), Ok(3072));
        assert_eq!(parse_size("2M"), Ok(2 * 1024 * 1024));
        assert_eq!(parse_size(" 1Mb "), Ok(1024 * 1024));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("abc").is_err());
        assert!(parse_size("10g").is_err());
        assert!(parse_size("-5k").is_err());
        assert!(parse_size("1.5m").is_err());
        assert!(parse_size("").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["ctxcat", "src"]).unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.paths, vec![PathBuf::from("src")]);
        assert_eq!(config.max_size, 102_400);
        assert!(config.include_patterns.is_empty());
        assert!(config.writes_stdout());
    }

    #[test]
    fn test_args_full_surface() {
        let args = Args::try_parse_from([
            "ctxcat", "a", "b", "-o", "out.txt", "--max-size", "1k", "--yes", "-c", "--include",
            "*.rs", "*.md", "--exclude", "gen/**,*.lock",
        ])
        .unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.paths.len(), 2);
        assert_eq!(config.output_file, Some(PathBuf::from("out.txt")));
        assert_eq!(config.max_size, 1024);
        assert!(config.auto_confirm);
        assert!(config.clip);
        assert_eq!(config.include_patterns, vec!["*.rs", "*.md"]);
        assert_eq!(config.exclude_patterns, vec!["gen/**", "*.lock"]);
        assert!(!config.writes_stdout());
    }

    #[test]
    fn test_pattern_flags_need_separator_before_paths() {
        let args =
            Args::try_parse_from(["ctxcat", "--include", "*.rs", "--", "src"]).unwrap();
        assert_eq!(args.include, vec!["*.rs"]);
        assert_eq!(args.paths, vec!["src"]);

        // Without `--` the path is taken as another pattern
        let err = Args::try_parse_from(["ctxcat", "--include", "*.rs", "src"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_commas_split_brace_patterns() {
        let args = Args::try_parse_from(["ctxcat", ".", "--include", "*.{rs,md}"]).unwrap();
        assert_eq!(args.include, vec!["*.{rs", "md}"]);

        let mut cmd = <Args as clap::CommandFactory>::command();
        let help = cmd.render_long_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("brace alternatives"));
        assert!(help.contains("`--`"));
    }

    #[test]
    fn test_camel_case_max_size_flag() {
        let args = Args::try_parse_from(["ctxcat", ".", "--maxSize", "2mb"]).unwrap();
        assert_eq!(args.max_size, 2 * 1024 * 1024);

        let err = Args::try_parse_from(["ctxcat", ".", "--maxSize", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_paths_required() {
        let err = Args::try_parse_from(["ctxcat"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(Args::try_parse_from(["ctxcat", "--generate", "bash"]).is_ok());
    }

    #[test]
    fn test_version_flag_is_lowercase() {
        let err = Args::try_parse_from(["ctxcat", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_validate_output_parent() {
        let mut config = Config::from_args(Args::try_parse_from(["ctxcat", "."]).unwrap());
        assert!(config.validate().is_ok());

        config.output_file = Some(PathBuf::from("/no/such/dir/out.txt"));
        assert!(config.validate().is_err());
    }
}
