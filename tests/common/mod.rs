use assert_cmd::{Command, cargo::cargo_bin_cmd};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two sibling roots `a` and `b` inside one temporary directory.
pub struct TreePair {
    pub temp: TempDir,
    pub a: PathBuf,
    pub b: PathBuf,
}

impl TreePair {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        TreePair { temp, a, b }
    }

    /// Runs dircomp from the temporary directory with `a` and `b` as roots,
    /// so report headings read `"a"` and `"b"`.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dircomp");
        cmd.current_dir(self.temp.path()).arg("a").arg("b");
        cmd
    }
}

pub fn write_file(root: &Path, name: &str, contents: &[u8], mtime: i64) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
}

// Each integration test file is compiled as its own crate, and not all of
// them need raw stdout.
#[allow(dead_code)]
pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run `dircomp`");
    assert!(output.status.success(), "dircomp failed: {output:?}");
    String::from_utf8(output.stdout).expect("stdout should be UTF-8")
}
