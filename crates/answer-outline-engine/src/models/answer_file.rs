use relative_path::{RelativePath, RelativePathBuf};

/// File extensions recognised as stored answers.
pub const ANSWER_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// An answer file in the bank, named after the question it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFile {
    relative_path: RelativePathBuf,
    question: String,
}

impl AnswerFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let question = Self::extract_question(&relative_path);
        Self {
            relative_path,
            question,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// The question title: file stem with `-`/`_` shown as spaces.
    pub fn question(&self) -> &str {
        &self.question
    }

    fn extract_question(path: &RelativePath) -> String {
        path.file_stem()
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.replace(['-', '_'], " "))
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

impl From<&str> for AnswerFile {
    fn from(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }
}
