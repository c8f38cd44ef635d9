use crate::models::{ANSWER_EXTENSIONS, AnswerFile};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Answer file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid answers directory: {0}")]
    InvalidAnswerDir(String),
}

/// Read an answer file and return its content
pub fn read_answer(relative_path: &RelativePath, answers_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(answers_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan the answers directory for answer files, sorted by relative path
pub fn scan_answer_files(answers_root: &Path) -> Result<Vec<AnswerFile>, IoError> {
    validate_answer_dir(answers_root)?;

    let mut paths = Vec::new();
    scan_directory_recursive(answers_root, &mut paths)?;

    let mut files: Vec<AnswerFile> = paths
        .iter()
        .filter_map(|path| to_relative(answers_root, path))
        .map(AnswerFile::new)
        .collect();
    files.sort_by(|a, b| a.relative_path().as_str().cmp(b.relative_path().as_str()));
    log::debug!(
        "found {} answer files under {}",
        files.len(),
        answers_root.display()
    );
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension().and_then(|ext| ext.to_str())
            && ANSWER_EXTENSIONS.contains(&ext)
        {
            files.push(path);
        }
    }

    Ok(())
}

fn to_relative(root: &Path, path: &Path) -> Option<RelativePathBuf> {
    let stripped = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(RelativePathBuf::from(parts.join("/")))
}

pub fn validate_answer_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidAnswerDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_answers_dir, create_test_file};

    #[test]
    fn test_scan_finds_md_and_txt_answers() {
        let answers_dir = create_test_answers_dir();
        create_test_file(&answers_dir, "closures.md", "1. capture\n2. outlive");
        create_test_file(&answers_dir, "hoisting.txt", "Declarations move up.");
        create_test_file(&answers_dir, "diagram.png", "fake image data");

        let files = scan_answer_files(answers_dir.path()).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.relative_path().as_str()).collect();
        assert_eq!(paths, vec!["closures.md", "hoisting.txt"]);
    }

    #[test]
    fn test_scan_nested_directories_uses_forward_slashes() {
        let answers_dir = create_test_answers_dir();
        create_test_file(&answers_dir, "root.md", "Root answer");
        let sub_dir = answers_dir.path().join("javascript");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("var-vs-let.md"), "1. var\n2. let").unwrap();

        let files = scan_answer_files(answers_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(
            files[0].relative_path().as_str(),
            "javascript/var-vs-let.md"
        );
        assert_eq!(files[0].question(), "var vs let");
        assert_eq!(files[1].relative_path().as_str(), "root.md");
    }

    #[test]
    fn test_scan_invalid_directory() {
        let result = scan_answer_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidAnswerDir(_))));
    }

    #[test]
    fn test_validate_answer_dir_rejects_file() {
        let answers_dir = create_test_answers_dir();
        let file = create_test_file(&answers_dir, "a.md", "x");
        assert!(validate_answer_dir(&file).is_err());
        assert!(validate_answer_dir(answers_dir.path()).is_ok());
    }

    #[test]
    fn test_read_answer_success() {
        let answers_dir = create_test_answers_dir();
        create_test_file(&answers_dir, "scope.md", "Scopes:\n1. var\n2. let");

        let content = read_answer(RelativePath::new("scope.md"), answers_dir.path()).unwrap();
        assert_eq!(content, "Scopes:\n1. var\n2. let");
    }

    #[test]
    fn test_read_answer_not_found() {
        let answers_dir = create_test_answers_dir();
        let result = read_answer(RelativePath::new("missing.md"), answers_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
