/*!
 * Command-line interface for ctxcat
 */

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use ctxcat::config::{Args, Config};
use ctxcat::gate::StdinPrompter;
use ctxcat::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "ctxcat", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    let config = Config::from_args(args);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut prompter = StdinPrompter;
    let mut stdout = io::stdout().lock();
    let outcome = ctxcat::run(&config, &mut prompter, Arc::new(progress.clone()), &mut stdout);
    progress.finish_and_clear();

    match outcome {
        Ok(outcome) => {
            let _ = stdout.flush();
            Reporter::new(ReportFormat::ConsoleTable).print_report(&outcome.report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().filter_or("CTXCAT_LOG", level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}
