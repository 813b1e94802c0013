//! Set algebra over two entry sets.
//!
//! Every path in the union of both sets lands in exactly one of the
//! categories of [`Classification`].

use crate::dir_list::EntryKind;
use crate::traverse::EntrySet;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub left_only: BTreeMap<PathBuf, EntryKind>,
    pub right_only: BTreeMap<PathBuf, EntryKind>,
    /// Paths present on both sides with different kinds, as `(left, right)`.
    pub type_mismatch: BTreeMap<PathBuf, (EntryKind, EntryKind)>,
    pub common_files: BTreeSet<PathBuf>,
    pub common_dirs: BTreeSet<PathBuf>,
}

impl Classification {
    /// Entries without a matching counterpart on the other side, as seen
    /// from `side`: its exclusive entries plus every type mismatch, with the
    /// kind found on `side`. Sorted by path.
    pub fn only_under(&self, side: Side) -> Vec<(&Path, EntryKind)> {
        let exclusive = match side {
            Side::Left => &self.left_only,
            Side::Right => &self.right_only,
        };

        let mut entries: Vec<(&Path, EntryKind)> = exclusive
            .iter()
            .map(|(path, kind)| (path.as_path(), *kind))
            .chain(self.type_mismatch.iter().map(|(path, (left, right))| {
                let kind = match side {
                    Side::Left => *left,
                    Side::Right => *right,
                };
                (path.as_path(), kind)
            }))
            .collect();

        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

pub fn classify(left: &EntrySet, right: &EntrySet) -> Classification {
    let mut classification = Classification::default();

    for (path, left_kind) in left.iter() {
        match right.get(path) {
            None => {
                classification
                    .left_only
                    .insert(path.to_path_buf(), left_kind);
            }
            Some(right_kind) if right_kind != left_kind => {
                classification
                    .type_mismatch
                    .insert(path.to_path_buf(), (left_kind, right_kind));
            }
            Some(EntryKind::File) => {
                classification.common_files.insert(path.to_path_buf());
            }
            Some(EntryKind::Dir) => {
                classification.common_dirs.insert(path.to_path_buf());
            }
        }
    }

    for (path, right_kind) in right.iter() {
        if left.get(path).is_none() {
            classification
                .right_only
                .insert(path.to_path_buf(), right_kind);
        }
    }

    classification
}
