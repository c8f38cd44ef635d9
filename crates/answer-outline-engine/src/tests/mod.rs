use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary answers directory
pub fn create_test_answers_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create an answer file with content
pub fn create_test_file(answers_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = answers_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
