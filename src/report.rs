use crate::audit::TreeComparison;
use crate::classify::Side;
use crate::compare::{Outcome, OutcomeType, mtime_difference_secs};
use crate::dir_list::EntryKind;
use crate::fingerprint::compute_fingerprint;
use crate::roots::Roots;
use crate::util::ascii::escape_path;
use std::io::{self, Write};
use std::path::{MAIN_SEPARATOR, Path};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub compare_contents: bool,
    pub show_identical: bool,
    pub details: bool,
    pub fingerprint: bool,
}

pub fn write_report<W: Write>(
    out: &mut W,
    roots: &Roots,
    comparison: &TreeComparison,
    options: &ReportOptions,
) -> io::Result<()> {
    for (side, root) in [(Side::Left, &roots.left.given), (Side::Right, &roots.right.given)] {
        writeln!(out, "{}", heading_for_root("Entries only under", root))?;
        for (path, kind) in comparison.classification.only_under(side) {
            writeln!(out, "{}", format_entry(path, kind))?;
        }
    }

    write_section(
        out,
        comparison,
        "Files with different size",
        OutcomeType::SizeMismatch,
        options,
    )?;
    write_section(
        out,
        comparison,
        "Files with same size, different time of last modification",
        OutcomeType::MtimeMismatch,
        options,
    )?;

    if options.compare_contents {
        write_section(
            out,
            comparison,
            "Files with same size, different contents",
            OutcomeType::ContentMismatch,
            options,
        )?;
    }

    if comparison.unreadable().next().is_some() {
        write_section(
            out,
            comparison,
            "Files that could not be compared",
            OutcomeType::Unreadable,
            options,
        )?;
    }

    if options.show_identical {
        if options.compare_contents {
            write_section(
                out,
                comparison,
                "Identical files",
                OutcomeType::Identical,
                options,
            )?;
        } else {
            write_section(
                out,
                comparison,
                "Files with same size and time, contents not compared",
                OutcomeType::PresumedIdentical,
                options,
            )?;
        }
    }

    if options.fingerprint {
        writeln!(out)?;
        writeln!(out, "Fingerprint: {}", compute_fingerprint(comparison))?;
    }

    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    comparison: &TreeComparison,
    title: &str,
    outcome_type: OutcomeType,
    options: &ReportOptions,
) -> io::Result<()> {
    writeln!(out, "{}", heading(title))?;

    for file in &comparison.files {
        if file.outcome.outcome_type() != outcome_type {
            continue;
        }
        writeln!(out, "{}", escape_path(&file.path))?;
        if options.details {
            for line in format_detail_lines(&file.outcome) {
                writeln!(out, "{line}")?;
            }
        }
    }

    Ok(())
}

fn heading(text: &str) -> String {
    format!("*** {text} ***")
}

fn heading_for_root(text: &str, root: &Path) -> String {
    heading(&format!("{} \"{}\"", text, escape_path(root)))
}

/// Directories get a trailing separator so they stand apart from files.
fn format_entry(path: &Path, kind: EntryKind) -> String {
    let mut line = escape_path(path);
    if kind == EntryKind::Dir {
        line.push(MAIN_SEPARATOR);
    }
    line
}

fn format_detail_lines(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::SizeMismatch { left, right } => {
            vec![format!(
                "   size: {} -> {}",
                format_size(*left),
                format_size(*right)
            )]
        }
        Outcome::MtimeMismatch { left, right } => {
            vec![format!(
                "   mtime: {} -> {} ({})",
                format_mtime(*left),
                format_mtime(*right),
                format_mtime_delta(*left, *right)
            )]
        }
        Outcome::ContentMismatch { offset } => {
            vec![format!("   first difference at byte {offset}")]
        }
        Outcome::Unreadable(error) => vec![format!("   error: {error}")],
        Outcome::Identical | Outcome::PresumedIdentical => Vec::new(),
    }
}

/// How far `right` is ahead of `left`, as shown after an mtime mismatch.
fn format_mtime_delta(left: SystemTime, right: SystemTime) -> String {
    format!("{:+} s", mtime_difference_secs(right, left))
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

fn format_mtime(time: SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
