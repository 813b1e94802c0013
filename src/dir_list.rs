//! Non-recursive directory listing.
//!
//! Lists the immediate children of one directory together with their kind.
//! Symlinks are resolved when deciding the kind, so a link to a directory is
//! reported as a directory and a dangling link is reported as a file.

use crate::util::ascii::escape_path;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DirListError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {}", escape_path(.0))]
    PermissionDenied(PathBuf),
}

impl DirListError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::PermissionDenied {
            DirListError::PermissionDenied(path.to_path_buf())
        } else {
            DirListError::Io(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

pub fn list_directory(dir: &Path) -> Result<Vec<FsEntry>, DirListError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| DirListError::from_io(dir, e))?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(|e| DirListError::from_io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| DirListError::from_io(dir, e))?;

        let is_dir = if file_type.is_symlink() {
            std::fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        entries.push(FsEntry {
            name: entry.file_name(),
            kind: if is_dir { EntryKind::Dir } else { EntryKind::File },
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}
