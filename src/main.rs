mod audit;
mod classify;
mod cli;
mod compare;
mod dir_list;
mod fingerprint;
mod report;
mod roots;
mod traverse;
mod util;

use cli::{Cli, LogLevel};
use compare::CompareOptions;
use report::ReportOptions;
use roots::Roots;
use std::fmt as stdfmt;
use std::io::{IsTerminal, Write, stderr, stdout};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, warn};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use util::ascii::escape_path;

struct DircompExitCode;

impl DircompExitCode {
    /// Exit code used for invalid roots and unrecoverable I/O errors.
    /// Finding differences is not an error.
    fn any_error() -> ExitCode {
        ExitCode::from(1)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_level);

    match run(&cli) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");
            DircompExitCode::any_error()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let roots = Roots::validate(&cli.left, &cli.right)?;

    let options = CompareOptions {
        mtime_tolerance: cli.mtime_tolerance,
        compare_contents: cli.compare_contents,
        jobs: cli.jobs,
        ..CompareOptions::default()
    };

    let comparison = audit::compare_trees(&roots, &options)?;

    for warning in &comparison.warnings {
        warn!("{warning}");
    }

    for file in comparison.unreadable() {
        if let compare::Outcome::Unreadable(e) = &file.outcome {
            warn!("Could not compare {}: {}", escape_path(&file.path), e);
        }
    }

    let report_options = ReportOptions {
        compare_contents: cli.compare_contents,
        show_identical: cli.show_identical,
        details: cli.details,
        fingerprint: cli.fingerprint,
    };

    let mut out = stdout().lock();
    report::write_report(&mut out, &roots, &comparison, &report_options)?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn filter_for(verbose: u8, log_level: Option<LogLevel>) -> Option<&'static str> {
    match (log_level, verbose) {
        (Some(level), _) => Some(level.as_filter()),
        (None, 0) => None,
        (None, 1) => Some("info"),
        (None, _) => Some("debug"),
    }
}

fn init_tracing(verbose: u8, log_level: Option<LogLevel>) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    let filter = match filter_for(verbose, log_level) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::DEBUG => write!(writer, "🔍 ")?,
                Level::INFO => write!(writer, "ℹ️ ")?,
                Level::WARN => write!(writer, "⚠️  ")?,
                Level::ERROR => write!(writer, "❌️ ")?,
                _ => {}
            }
        } else {
            match *event.metadata().level() {
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => {}
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
