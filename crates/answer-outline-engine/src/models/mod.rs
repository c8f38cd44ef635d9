pub mod answer_file;

pub use answer_file::{ANSWER_EXTENSIONS, AnswerFile};
