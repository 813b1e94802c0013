use super::*;
use filetime::{FileTime, set_file_mtime};
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    left: PathBuf,
    right: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let left = temp.path().join("left");
        let right = temp.path().join("right");
        fs::create_dir(&left).unwrap();
        fs::create_dir(&right).unwrap();
        Fixture {
            _temp: temp,
            left,
            right,
        }
    }

    /// Writes both sides and pins both mtimes to the same second.
    fn write(&self, name: &str, left: &[u8], right: &[u8]) {
        fs::write(self.left.join(name), left).unwrap();
        fs::write(self.right.join(name), right).unwrap();
        self.set_mtimes(name, (1_700_000_000, 0), (1_700_000_000, 0));
    }

    fn set_mtimes(&self, name: &str, left: (i64, u32), right: (i64, u32)) {
        set_file_mtime(
            self.left.join(name),
            FileTime::from_unix_time(left.0, left.1),
        )
        .unwrap();
        set_file_mtime(
            self.right.join(name),
            FileTime::from_unix_time(right.0, right.1),
        )
        .unwrap();
    }

    fn compare(&self, names: &[&str], options: &CompareOptions) -> PipelineResult {
        let common: BTreeSet<PathBuf> = names.iter().map(PathBuf::from).collect();
        compare(&self.left, &self.right, &common, options)
    }

    fn compare_one(&self, name: &str, options: &CompareOptions) -> (Outcome, CompareStats) {
        let mut result = self.compare(&[name], options);
        assert_eq!(result.files.len(), 1);
        let file = result.files.remove(0);
        assert_eq!(file.path, Path::new(name));
        (file.outcome, result.stats)
    }
}

fn options(compare_contents: bool, mtime_tolerance: u64) -> CompareOptions {
    CompareOptions {
        mtime_tolerance,
        compare_contents,
        ..CompareOptions::default()
    }
}

fn types(result: &PipelineResult) -> Vec<(String, OutcomeType)> {
    result
        .files
        .iter()
        .map(|f| (f.path.to_string_lossy().into_owned(), f.outcome.outcome_type()))
        .collect()
}
