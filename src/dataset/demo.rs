use include_dir::{include_dir, Dir};

use super::{Dataset, QuizEntry, WordEntry};
use crate::error::DataLoadError;

static DEMO_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data/demo");

pub const DEMO_WORDS_FILE: &str = "words.csv";
pub const DEMO_QUIZ_FILE: &str = "vs_quiz.csv";

/// Sample word list bundled into the binary
pub fn demo_words() -> Result<Dataset<WordEntry>, DataLoadError> {
    Dataset::from_reader(demo_bytes(DEMO_WORDS_FILE), demo_name(DEMO_WORDS_FILE), b',')
}

/// Sample quiz list bundled into the binary
pub fn demo_quiz() -> Result<Dataset<QuizEntry>, DataLoadError> {
    Dataset::from_reader(demo_bytes(DEMO_QUIZ_FILE), demo_name(DEMO_QUIZ_FILE), b',')
}

fn demo_bytes(file_name: &str) -> &'static [u8] {
    DEMO_DIR
        .get_file(file_name)
        .map(|f| f.contents())
        .unwrap_or_default()
}

fn demo_name(file_name: &str) -> String {
    format!("demo {file_name}")
}
