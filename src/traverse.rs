//! Recursive traversal of one root into an [`EntrySet`].
//!
//! The walk uses an explicit stack of pending directories rather than call
//! recursion, so tree depth does not grow the call stack. A directory below
//! the root that cannot be listed is skipped and recorded as a
//! [`TraversalWarning`]; only a failure to list the root itself is fatal.

use crate::dir_list::{DirListError, EntryKind, list_directory};
use crate::util::ascii::escape_path;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum TraverseError {
    #[error("Cannot read {}: {source}", escape_path(.path))]
    Root {
        path: PathBuf,
        #[source]
        source: DirListError,
    },
}

/// Relative paths under one root, each mapped to its kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: BTreeMap<PathBuf, EntryKind>,
}

impl EntrySet {
    pub fn get(&self, path: &Path) -> Option<EntryKind> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, EntryKind)> {
        self.entries.iter().map(|(path, kind)| (path.as_path(), *kind))
    }
}

impl FromIterator<(PathBuf, EntryKind)> for EntrySet {
    fn from_iter<I: IntoIterator<Item = (PathBuf, EntryKind)>>(iter: I) -> Self {
        EntrySet {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A subtree that was left out of the entry set.
#[derive(Debug)]
pub struct TraversalWarning {
    /// Absolute path of the directory that could not be listed.
    pub path: PathBuf,
    pub error: DirListError,
}

impl fmt::Display for TraversalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            DirListError::PermissionDenied(_) => {
                write!(f, "No permission: \"{}\"", escape_path(&self.path))
            }
            DirListError::Io(e) => write!(f, "Cannot list \"{}\": {}", escape_path(&self.path), e),
        }
    }
}

#[derive(Debug)]
pub struct Traversal {
    pub entries: EntrySet,
    pub warnings: Vec<TraversalWarning>,
}

pub fn traverse(root: &Path) -> Result<Traversal, TraverseError> {
    let mut entries = BTreeMap::new();
    let mut warnings = Vec::new();

    let top = list_directory(root).map_err(|source| TraverseError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let mut pending = vec![(PathBuf::new(), top)];

    while let Some((relative_dir, children)) = pending.pop() {
        for child in children {
            let relative_path = relative_dir.join(&child.name);

            if child.kind == EntryKind::Dir {
                let absolute_path = root.join(&relative_path);
                debug!("Listing {}", absolute_path.display());

                match list_directory(&absolute_path) {
                    Ok(grandchildren) => pending.push((relative_path.clone(), grandchildren)),
                    Err(error) => warnings.push(TraversalWarning {
                        path: absolute_path,
                        error,
                    }),
                }
            }

            entries.insert(relative_path, child.kind);
        }
    }

    Ok(Traversal {
        entries: EntrySet { entries },
        warnings,
    })
}
