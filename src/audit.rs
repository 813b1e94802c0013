//! One full comparison run: traverse both roots, classify, compare files.

use crate::classify::{Classification, classify};
use crate::compare::{CompareOptions, CompareStats, FileComparison, Outcome, compare};
use crate::roots::{Root, Roots};
use crate::traverse::{Traversal, TraversalWarning, TraverseError, traverse};
use crate::util::ascii::escape_path;
use std::thread;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Traversal error: {0}")]
    Traverse(#[from] TraverseError),
}

#[derive(Debug, Default)]
pub struct TreeComparison {
    pub classification: Classification,
    /// Outcome for every common file, sorted by path.
    pub files: Vec<FileComparison>,
    pub stats: CompareStats,
    /// Subtrees omitted from either side, left root first.
    pub warnings: Vec<TraversalWarning>,
}

impl TreeComparison {
    pub fn unreadable(&self) -> impl Iterator<Item = &FileComparison> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Unreadable(_)))
    }
}

pub fn compare_trees(roots: &Roots, options: &CompareOptions) -> Result<TreeComparison, AuditError> {
    let (left, right) = traverse_roots(roots, options.jobs.get() > 1);
    let (left, right) = (left?, right?);

    let classification = classify(&left.entries, &right.entries);
    info!(
        "{} common files, {} common directories, {} entries only under one side, {} type mismatches",
        classification.common_files.len(),
        classification.common_dirs.len(),
        classification.left_only.len() + classification.right_only.len(),
        classification.type_mismatch.len()
    );

    let pipeline = compare(
        &roots.left.path,
        &roots.right.path,
        &classification.common_files,
        options,
    );
    info!(
        "Compared {} files ({} content checks, {} bytes read)",
        pipeline.stats.files, pipeline.stats.content_checks, pipeline.stats.bytes_read
    );

    let mut warnings = left.warnings;
    warnings.extend(right.warnings);

    Ok(TreeComparison {
        classification,
        files: pipeline.files,
        stats: pipeline.stats,
        warnings,
    })
}

type TraversalResult = Result<Traversal, TraverseError>;

fn traverse_roots(roots: &Roots, concurrent: bool) -> (TraversalResult, TraversalResult) {
    let read = |root: &Root| -> TraversalResult {
        info!("Reading path \"{}\"", escape_path(&root.given));
        let traversal = traverse(&root.path)?;
        info!(
            "Found {} entries under \"{}\"",
            traversal.entries.len(),
            escape_path(&root.given)
        );
        Ok(traversal)
    };

    if !concurrent {
        return (read(&roots.left), read(&roots.right));
    }

    thread::scope(|scope| {
        let left = scope.spawn(|| read(&roots.left));
        let right = read(&roots.right);
        match left.join() {
            Ok(left) => (left, right),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
