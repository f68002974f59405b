use crate::error::DatasetKind;

/// One flashcard row: english headword and its korean meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub english: String,
    pub korean: String,
    pub synonyms: Option<String>,
    pub example: Option<String>,
}

impl WordEntry {
    pub fn new(english: impl Into<String>, korean: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            korean: korean.into(),
            synonyms: None,
            example: None,
        }
    }

    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = non_empty(synonyms.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = non_empty(example.into());
        self
    }
}

/// One versus-quiz row: a sentence with a blank and two candidate words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizEntry {
    pub question: String,
    pub correct: String,
    pub wrong: String,
    pub explanation: Option<String>,
}

impl QuizEntry {
    pub fn new(
        question: impl Into<String>,
        correct: impl Into<String>,
        wrong: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            correct: correct.into(),
            wrong: wrong.into(),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = non_empty(explanation.into());
        self
    }
}

/// A row type the loader can build from positional columns
pub trait Record: Sized {
    const KIND: DatasetKind;
    const MIN_COLUMNS: usize;

    /// Build a record from one data row. `Err` carries the name of the
    /// required column that was empty.
    fn from_row(row: &Row<'_>) -> Result<Self, &'static str>;
}

/// Positional view over one data row, bounded by the header's column count.
/// Cells are trimmed; ragged rows read as empty past their end.
pub struct Row<'a> {
    cells: Vec<&'a str>,
    columns: usize,
}

impl<'a> Row<'a> {
    pub fn new<I>(cells: I, columns: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            cells: cells.into_iter().take(columns).map(str::trim).collect(),
            columns,
        }
    }

    pub fn cell(&self, idx: usize) -> &'a str {
        self.cells.get(idx).copied().unwrap_or("")
    }

    pub fn required(&self, idx: usize, column: &'static str) -> Result<String, &'static str> {
        match self.cell(idx) {
            "" => Err(column),
            value => Ok(value.to_string()),
        }
    }

    pub fn optional(&self, idx: usize) -> Option<String> {
        non_empty(self.cell(idx).to_string())
    }

    pub fn is_blank(&self) -> bool {
        (0..self.columns).all(|idx| self.cell(idx).is_empty())
    }
}

impl Record for WordEntry {
    const KIND: DatasetKind = DatasetKind::Words;
    const MIN_COLUMNS: usize = 2;

    fn from_row(row: &Row<'_>) -> Result<Self, &'static str> {
        Ok(Self {
            english: row.required(0, "English")?,
            korean: row.required(1, "Korean")?,
            synonyms: row.optional(2),
            example: row.optional(3),
        })
    }
}

impl Record for QuizEntry {
    const KIND: DatasetKind = DatasetKind::Quiz;
    const MIN_COLUMNS: usize = 4;

    fn from_row(row: &Row<'_>) -> Result<Self, &'static str> {
        Ok(Self {
            question: row.required(0, "Question")?,
            correct: row.required(1, "Correct")?,
            wrong: row.required(2, "Wrong")?,
            explanation: row.optional(3),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    #[test]
    fn three_column_row_has_no_example() {
        let record = StringRecord::from(vec!["abate", "감소하다", "diminish"]);
        let entry = WordEntry::from_row(&Row::new(&record, 3)).unwrap();

        assert_eq!(entry.english, "abate");
        assert_eq!(entry.korean, "감소하다");
        assert_eq!(entry.synonyms.as_deref(), Some("diminish"));
        assert_eq!(entry.example, None);
    }

    #[test]
    fn cells_beyond_header_width_are_ignored() {
        let record = StringRecord::from(vec!["abate", "감소하다", "", "ignored"]);
        let entry = WordEntry::from_row(&Row::new(&record, 2)).unwrap();

        assert_eq!(entry.synonyms, None);
        assert_eq!(entry.example, None);
    }

    #[test]
    fn missing_required_cell_names_the_column() {
        let record = StringRecord::from(vec!["The report is ___ accurate.", "highly", "  "]);
        let err = QuizEntry::from_row(&Row::new(&record, 4)).unwrap_err();
        assert_eq!(err, "Wrong");
    }

    #[test]
    fn blank_explanation_is_absent() {
        let record = StringRecord::from(vec!["q", "a", "b", "   "]);
        let entry = QuizEntry::from_row(&Row::new(&record, 4)).unwrap();
        assert_eq!(entry.explanation, None);
    }

    #[test]
    fn blank_row_detection() {
        let record = StringRecord::from(vec!["", " ", ""]);
        assert!(Row::new(&record, 3).is_blank());

        let record = StringRecord::from(vec!["", "x"]);
        assert!(!Row::new(&record, 2).is_blank());
    }

    #[test]
    fn worksheet_cells_map_like_csv_cells() {
        let cells = vec![" abate ".to_string(), "감소하다".to_string(), String::new()];
        let entry = WordEntry::from_row(&Row::new(cells.iter().map(String::as_str), 4)).unwrap();

        assert_eq!(entry, WordEntry::new("abate", "감소하다"));
    }

    #[test]
    fn builders_drop_empty_optionals() {
        let entry = WordEntry::new("abate", "감소하다")
            .with_synonyms("")
            .with_example("The storm abated.");
        assert_eq!(entry.synonyms, None);
        assert_eq!(entry.example.as_deref(), Some("The storm abated."));
    }
}
