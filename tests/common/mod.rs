#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv_cleanse::{Table, data::Value};
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Text cells of a column, with `None` for missing and numeric cells.
pub fn texts(table: &Table, column: &str) -> Vec<Option<String>> {
    table
        .column(column)
        .unwrap_or_else(|| panic!("column '{column}' present"))
        .cells
        .iter()
        .map(|c| c.as_ref().and_then(Value::as_text).map(str::to_string))
        .collect()
}

/// Numeric cells of a column, with `None` for missing and text cells.
pub fn numbers(table: &Table, column: &str) -> Vec<Option<f64>> {
    table
        .column(column)
        .unwrap_or_else(|| panic!("column '{column}' present"))
        .cells
        .iter()
        .map(|c| c.as_ref().and_then(Value::as_number))
        .collect()
}
