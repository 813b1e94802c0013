use clap::{ArgAction, Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

mod help_text;

/// Compare files and subdirectories under two directories recursively
#[derive(Parser, Debug)]
#[command(name = "dircomp", version, long_about = help_text::ROOT_LONG_ABOUT)]
pub struct Cli {
    /// First directory (A)
    #[arg(value_name = "PATH_A")]
    pub left: PathBuf,

    /// Second directory (B)
    #[arg(value_name = "PATH_B")]
    pub right: PathBuf,

    /// Compare the contents of same-size files (may take a long time)
    #[arg(short = 'c', long)]
    pub compare_contents: bool,

    /// Treat modification times as equal if they differ by at most this many seconds
    #[arg(short = 'm', long, value_name = "SECONDS", default_value_t = 0)]
    pub mtime_tolerance: u64,

    /// Also list files found identical (or presumed identical without -c)
    #[arg(short = 'i', long)]
    pub show_identical: bool,

    /// Show sizes, times, or the first differing byte under each mismatch
    #[arg(short = 'd', long)]
    pub details: bool,

    /// Print a fingerprint of all differences found
    #[arg(long)]
    pub fingerprint: bool,

    /// Number of files to compare in parallel
    #[arg(short = 'j', long, value_name = "N", default_value = "1")]
    pub jobs: NonZeroUsize,

    /// Increase log verbosity (-v info, -vv debug). Takes precedence over RUST_LOG.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Set the log level explicitly. Takes precedence over RUST_LOG.
    #[arg(long, value_name = "LEVEL", conflicts_with = "verbose")]
    pub log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dircomp").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&["a", "b"]).unwrap();

        assert_eq!(cli.left, PathBuf::from("a"));
        assert_eq!(cli.right, PathBuf::from("b"));
        assert!(!cli.compare_contents);
        assert_eq!(cli.mtime_tolerance, 0);
        assert_eq!(cli.jobs.get(), 1);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-c", "-m", "10", "-i", "-d", "-j", "4", "-vv", "a", "b"]).unwrap();

        assert!(cli.compare_contents);
        assert_eq!(cli.mtime_tolerance, 10);
        assert!(cli.show_identical);
        assert!(cli.details);
        assert_eq!(cli.jobs.get(), 4);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn long_flags() {
        let cli = parse(&[
            "--compare-contents",
            "--mtime-tolerance",
            "3",
            "--fingerprint",
            "--log-level",
            "debug",
            "a",
            "b",
        ])
        .unwrap();

        assert!(cli.compare_contents);
        assert_eq!(cli.mtime_tolerance, 3);
        assert!(cli.fingerprint);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn rejects_negative_tolerance() {
        assert!(parse(&["--mtime-tolerance=-1", "a", "b"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_tolerance() {
        assert!(parse(&["-m", "soon", "a", "b"]).is_err());
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(parse(&["-j", "0", "a", "b"]).is_err());
    }

    #[test]
    fn requires_two_paths() {
        assert!(parse(&["a"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn log_level_conflicts_with_verbose() {
        assert!(parse(&["-v", "--log-level", "info", "a", "b"]).is_err());
    }
}
