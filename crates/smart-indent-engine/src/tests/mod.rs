//! Shared helpers for unit tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::parsing::Document;

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

pub fn document(lines: &[&str]) -> Document {
    Document::from_lines(lines.iter().map(|l| l.to_string()).collect())
}
