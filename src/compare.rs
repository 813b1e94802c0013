//! Staged comparison of files present on both sides.
//!
//! Each file pair runs through size, then modification time, then
//! (optionally) content, and stops at the first stage that finds a
//! difference. Content is only read for pairs whose size is equal and whose
//! mtimes are within the configured tolerance.
//!
//! Failures are contained per file: a pair whose metadata or content cannot
//! be read gets [`Outcome::Unreadable`] and the remaining pairs are still
//! compared.

use crate::util::ascii::escape_path;
use crate::util::chunks::{CHUNK_SIZE, ChunkedFile};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Permission denied: {}", escape_path(.0))]
    PermissionDenied(PathBuf),
    #[error("IO error on {}: {source}", escape_path(.path))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::PermissionDenied {
            CompareError::PermissionDenied(path.to_path_buf())
        } else {
            CompareError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Largest absolute mtime difference, in whole seconds, that still
    /// counts as equal.
    pub mtime_tolerance: u64,
    pub compare_contents: bool,
    /// Number of worker threads comparing file pairs.
    pub jobs: NonZeroUsize,
    pub chunk_size: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            mtime_tolerance: 0,
            compare_contents: false,
            jobs: NonZeroUsize::MIN,
            chunk_size: CHUNK_SIZE,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    SizeMismatch {
        left: u64,
        right: u64,
    },
    MtimeMismatch {
        left: SystemTime,
        right: SystemTime,
    },
    /// Same size and mtime within tolerance, but the bytes differ starting
    /// at `offset`.
    ContentMismatch {
        offset: u64,
    },
    /// Contents were read and found equal.
    Identical,
    /// Same size and mtime within tolerance; contents were not read.
    PresumedIdentical,
    Unreadable(CompareError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutcomeType {
    SizeMismatch,
    MtimeMismatch,
    ContentMismatch,
    Identical,
    PresumedIdentical,
    Unreadable,
}

impl Outcome {
    pub fn outcome_type(&self) -> OutcomeType {
        match self {
            Outcome::SizeMismatch { .. } => OutcomeType::SizeMismatch,
            Outcome::MtimeMismatch { .. } => OutcomeType::MtimeMismatch,
            Outcome::ContentMismatch { .. } => OutcomeType::ContentMismatch,
            Outcome::Identical => OutcomeType::Identical,
            Outcome::PresumedIdentical => OutcomeType::PresumedIdentical,
            Outcome::Unreadable(_) => OutcomeType::Unreadable,
        }
    }
}

#[derive(Debug)]
pub struct FileComparison {
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareStats {
    pub files: usize,
    /// Pairs that entered the content stage.
    pub content_checks: usize,
    /// Bytes read by the content stage, both sides combined.
    pub bytes_read: u64,
}

impl CompareStats {
    fn merge(&mut self, other: CompareStats) {
        self.files += other.files;
        self.content_checks += other.content_checks;
        self.bytes_read += other.bytes_read;
    }
}

#[derive(Debug, Default)]
pub struct PipelineResult {
    /// Sorted by path.
    pub files: Vec<FileComparison>,
    pub stats: CompareStats,
}

/// Runs every path in `common_files` through the staged comparison.
///
/// With `options.jobs > 1` pairs are distributed over a bounded pool of
/// scoped threads. Each pair is compared independently, and the result is
/// sorted by path regardless of completion order.
pub fn compare(
    left_root: &Path,
    right_root: &Path,
    common_files: &BTreeSet<PathBuf>,
    options: &CompareOptions,
) -> PipelineResult {
    let paths: Vec<&Path> = common_files.iter().map(PathBuf::as_path).collect();
    let workers = options.jobs.get().min(paths.len());

    let mut result = PipelineResult::default();

    if workers <= 1 {
        for path in paths {
            let outcome = compare_pair(left_root, right_root, path, options, &mut result.stats);
            result.files.push(outcome);
        }
        return result;
    }

    debug!("Comparing {} files with {} workers", paths.len(), workers);

    let next = AtomicUsize::new(0);
    let (next, paths) = (&next, &paths);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move || {
                    let mut files = Vec::new();
                    let mut stats = CompareStats::default();
                    while let Some(path) = paths.get(next.fetch_add(1, Ordering::Relaxed)) {
                        files.push(compare_pair(left_root, right_root, path, options, &mut stats));
                    }
                    (files, stats)
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok((files, stats)) => {
                    result.files.extend(files);
                    result.stats.merge(stats);
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    result.files.sort_by(|a, b| a.path.cmp(&b.path));
    result
}

fn compare_pair(
    left_root: &Path,
    right_root: &Path,
    relative_path: &Path,
    options: &CompareOptions,
    stats: &mut CompareStats,
) -> FileComparison {
    let left = left_root.join(relative_path);
    let right = right_root.join(relative_path);

    stats.files += 1;
    let outcome = compare_files(&left, &right, options, stats).unwrap_or_else(Outcome::Unreadable);

    FileComparison {
        path: relative_path.to_path_buf(),
        outcome,
    }
}

/// Compares two files through the size, mtime and content stages.
pub fn compare_files(
    left: &Path,
    right: &Path,
    options: &CompareOptions,
    stats: &mut CompareStats,
) -> Result<Outcome, CompareError> {
    let left_meta = std::fs::metadata(left).map_err(|e| CompareError::from_io(left, e))?;
    let right_meta = std::fs::metadata(right).map_err(|e| CompareError::from_io(right, e))?;

    let (left_size, right_size) = (left_meta.len(), right_meta.len());
    if left_size != right_size {
        return Ok(Outcome::SizeMismatch {
            left: left_size,
            right: right_size,
        });
    }

    let left_mtime = left_meta
        .modified()
        .map_err(|e| CompareError::from_io(left, e))?;
    let right_mtime = right_meta
        .modified()
        .map_err(|e| CompareError::from_io(right, e))?;

    if mtime_differs(left_mtime, right_mtime, options.mtime_tolerance) {
        return Ok(Outcome::MtimeMismatch {
            left: left_mtime,
            right: right_mtime,
        });
    }

    if !options.compare_contents {
        return Ok(Outcome::PresumedIdentical);
    }

    stats.content_checks += 1;
    match first_difference(left, right, left_size, options.chunk_size, stats)? {
        Some(offset) => Ok(Outcome::ContentMismatch { offset }),
        None => Ok(Outcome::Identical),
    }
}

/// Signed difference `left - right` in whole seconds, truncated toward zero.
pub fn mtime_difference_secs(left: SystemTime, right: SystemTime) -> i64 {
    let nanos = signed_nanos(left) - signed_nanos(right);
    i64::try_from(nanos / 1_000_000_000).unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX })
}

pub fn mtime_differs(left: SystemTime, right: SystemTime, tolerance: u64) -> bool {
    mtime_difference_secs(left, right).unsigned_abs() > tolerance
}

fn signed_nanos(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}

/// Offset of the first differing byte of two files that are both `len`
/// bytes long, or `None` if their contents are equal.
fn first_difference(
    left: &Path,
    right: &Path,
    len: u64,
    chunk_size: usize,
    stats: &mut CompareStats,
) -> Result<Option<u64>, CompareError> {
    if len == 0 {
        return Ok(None);
    }

    debug!("Comparing contents of {}", left.display());

    let mut left_chunks =
        ChunkedFile::open(left, len, chunk_size).map_err(|e| CompareError::from_io(left, e))?;
    let mut right_chunks =
        ChunkedFile::open(right, len, chunk_size).map_err(|e| CompareError::from_io(right, e))?;

    loop {
        let offset = left_chunks.offset();
        let left_chunk = left_chunks
            .next_chunk()
            .map_err(|e| CompareError::from_io(left, e))?;
        let right_chunk = right_chunks
            .next_chunk()
            .map_err(|e| CompareError::from_io(right, e))?;

        let (Some(a), Some(b)) = (left_chunk, right_chunk) else {
            return Ok(None);
        };

        stats.bytes_read += (a.len() + b.len()) as u64;

        if a != b {
            let position = a.iter().zip(b).position(|(x, y)| x != y).unwrap_or(0);
            return Ok(Some(offset + position as u64));
        }
    }
}

#[cfg(test)]
mod tests;
