use itertools::Itertools;

use crate::dataset::{Dataset, QuizEntry, Record, WordEntry};
use crate::error::{DataLoadError, DatasetKind, DrillError, EmptyDatasetError};

/// Outcome of validating one dataset without starting the UI
#[derive(Debug)]
pub struct DatasetCheck {
    pub kind: DatasetKind,
    pub result: Result<(usize, String), DrillError>,
}

impl DatasetCheck {
    pub fn of<T: Record>(loaded: Result<Dataset<T>, DataLoadError>) -> Self {
        let result = match loaded {
            Err(e) => Err(e.into()),
            Ok(dataset) if dataset.is_empty() => {
                Err(EmptyDatasetError { kind: T::KIND }.into())
            }
            Ok(dataset) => Ok((dataset.len(), dataset.source_name().to_owned())),
        };
        Self {
            kind: T::KIND,
            result,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    fn label(&self) -> &'static str {
        match self.kind {
            DatasetKind::Words => "words",
            DatasetKind::Quiz => "quiz",
        }
    }

    pub fn line(&self) -> String {
        match &self.result {
            Ok((count, source)) => format!("{}: {count} entries from {source}", self.label()),
            Err(e) => format!("{}: error: {e}", self.label()),
        }
    }
}

#[derive(Debug)]
pub struct CheckReport {
    pub checks: Vec<DatasetCheck>,
}

impl CheckReport {
    pub fn new(
        words: Result<Dataset<WordEntry>, DataLoadError>,
        quiz: Result<Dataset<QuizEntry>, DataLoadError>,
    ) -> Self {
        Self {
            checks: vec![DatasetCheck::of(words), DatasetCheck::of(quiz)],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(DatasetCheck::is_ok)
    }

    pub fn render(&self) -> String {
        self.checks.iter().map(DatasetCheck::line).join("\n")
    }
}
