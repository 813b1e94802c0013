//! Validation of the two roots before any traversal starts.

use crate::util::ascii::escape_path;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("Does not exist or is not a directory: {}", escape_path(.0))]
    NotADirectory(PathBuf),
    #[error("Permission denied: {}", escape_path(.0))]
    PermissionDenied(PathBuf),
    #[error("IO error on {}: {source}", escape_path(.path))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Both paths refer to the same directory: {}", escape_path(.0))]
    Identical(PathBuf),
    #[error("{} is under {}", escape_path(.inner), escape_path(.outer))]
    Nested { inner: PathBuf, outer: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// The path as the operator spelled it, used in report headings.
    pub given: PathBuf,
    /// Absolute, canonical path used for all filesystem access.
    pub path: PathBuf,
}

impl Root {
    fn resolve(given: &Path) -> Result<Self, RootError> {
        let path = given.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => RootError::NotADirectory(given.to_path_buf()),
            ErrorKind::PermissionDenied => RootError::PermissionDenied(given.to_path_buf()),
            _ => RootError::Io {
                path: given.to_path_buf(),
                source: e,
            },
        })?;

        if !path.is_dir() {
            return Err(RootError::NotADirectory(given.to_path_buf()));
        }

        Ok(Root {
            given: given.to_path_buf(),
            path,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub left: Root,
    pub right: Root,
}

impl Roots {
    /// Resolves both roots and rejects pairs that cannot be compared
    /// meaningfully: missing or non-directory paths, the same directory
    /// twice, or one root nested inside the other.
    pub fn validate(left: &Path, right: &Path) -> Result<Self, RootError> {
        let left = Root::resolve(left)?;
        let right = Root::resolve(right)?;

        if left.path == right.path {
            return Err(RootError::Identical(left.path));
        }

        if left.path.starts_with(&right.path) {
            return Err(RootError::Nested {
                inner: left.given,
                outer: right.given,
            });
        }

        if right.path.starts_with(&left.path) {
            return Err(RootError::Nested {
                inner: right.given,
                outer: left.given,
            });
        }

        Ok(Roots { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_directories_are_valid() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();

        let roots = Roots::validate(&a, &b).unwrap();

        assert_eq!(roots.left.given, a);
        assert_eq!(roots.right.given, b);
        assert!(roots.left.path.is_absolute());
        assert_eq!(roots.left.path, a.canonicalize().unwrap());
    }

    #[test]
    fn test_shared_name_prefix_is_not_nesting() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("backup");
        let b = temp.path().join("backup-old");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();

        assert!(Roots::validate(&a, &b).is_ok());
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let result = Roots::validate(temp.path(), &missing);

        assert!(matches!(result, Err(RootError::NotADirectory(p)) if p == missing));
    }

    #[test]
    fn test_file_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        let file = temp.path().join("file.txt");
        fs::create_dir(&dir).unwrap();
        fs::write(&file, "not a dir").unwrap();

        let result = Roots::validate(&file, &dir);

        assert!(matches!(result, Err(RootError::NotADirectory(p)) if p == file));
    }

    #[test]
    fn test_identical_roots_are_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).unwrap();

        let result = Roots::validate(&dir, &dir.join("."));

        assert!(matches!(result, Err(RootError::Identical(_))));
    }

    #[test]
    fn test_nested_roots_are_rejected_both_ways() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("outer");
        let inner = outer.join("inner");
        fs::create_dir_all(&inner).unwrap();

        for (left, right) in [(&outer, &inner), (&inner, &outer)] {
            match Roots::validate(left, right) {
                Err(RootError::Nested {
                    inner: got_inner,
                    outer: got_outer,
                }) => {
                    assert_eq!(got_inner, inner);
                    assert_eq!(got_outer, outer);
                }
                other => panic!("Expected Nested error, got {other:?}"),
            }
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_alias_is_identical() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        let alias = temp.path().join("alias");
        fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(&dir, &alias).unwrap();

        let result = Roots::validate(&alias, &dir);

        assert!(matches!(result, Err(RootError::Identical(_))));
    }

    #[test]
    fn test_error_messages_escape_non_ascii_paths() {
        let nested = RootError::Nested {
            inner: PathBuf::from("fotos/\u{e9}t\u{e9}"),
            outer: PathBuf::from("fotos"),
        };
        let missing = RootError::NotADirectory(PathBuf::from("\u{65e5}\u{8a18}"));

        assert_eq!(nested.to_string(), "fotos/\\xe9t\\xe9 is under fotos");
        assert_eq!(
            missing.to_string(),
            "Does not exist or is not a directory: \\u65e5\\u8a18"
        );
    }
}
