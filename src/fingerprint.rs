//! Stable digest of the differences found by one run.
//!
//! The fingerprint covers every reported difference (exclusive entries, type
//! mismatches, size, mtime and content mismatches, unreadable files) but not
//! identical files and not the root paths themselves, so two audits of the
//! same pair of trees agree exactly when they found the same differences.

use crate::audit::TreeComparison;
use crate::compare::OutcomeType;
use crate::dir_list::EntryKind;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::path::Path;

pub fn compute_fingerprint(comparison: &TreeComparison) -> String {
    let mut hasher = Sha256::new();
    let classification = &comparison.classification;

    for (path, kind) in &classification.left_only {
        hash_record(&mut hasher, by_kind(*kind, "Lf", "Ld"), path);
    }
    for (path, kind) in &classification.right_only {
        hash_record(&mut hasher, by_kind(*kind, "Rf", "Rd"), path);
    }
    for (path, (left, _)) in &classification.type_mismatch {
        hash_record(&mut hasher, by_kind(*left, "Tf", "Td"), path);
    }

    for file in &comparison.files {
        let tag = match file.outcome.outcome_type() {
            OutcomeType::SizeMismatch => "S",
            OutcomeType::MtimeMismatch => "M",
            OutcomeType::ContentMismatch => "C",
            OutcomeType::Unreadable => "E",
            OutcomeType::Identical | OutcomeType::PresumedIdentical => continue,
        };
        hash_record(&mut hasher, tag, &file.path);
    }

    let hash_bytes = hasher.finalize();
    base64::engine::general_purpose::STANDARD.encode(hash_bytes)
}

fn by_kind(kind: EntryKind, file: &'static str, dir: &'static str) -> &'static str {
    match kind {
        EntryKind::File => file,
        EntryKind::Dir => dir,
    }
}

/// Feeds one `(tag, path)` record into the digest.
///
/// Both fields carry a big-endian length prefix, so a tag can never run into
/// the path that follows it. Paths are hashed as raw bytes on Unix so that
/// names which are not valid UTF-8 stay distinct.
fn hash_record(hasher: &mut Sha256, tag: &str, path: &Path) {
    hash_bytes(hasher, tag.as_bytes());

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        hash_bytes(hasher, path.as_os_str().as_bytes());
    }
    #[cfg(not(unix))]
    {
        hash_bytes(hasher, path.to_string_lossy().as_bytes());
    }
}

fn hash_bytes(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}
