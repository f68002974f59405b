use std::path::PathBuf;

use thiserror::Error;

/// Which of the two datasets an error or view refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DatasetKind {
    #[strum(serialize = "word list")]
    Words,
    #[strum(serialize = "quiz list")]
    Quiz,
}

/// Failure to turn a tabular source into a dataset
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read spreadsheet {source_name}: {source}")]
    Spreadsheet {
        source_name: String,
        #[source]
        source: calamine::Error,
    },

    #[error("cannot parse {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name} has {found} column(s); the {kind} needs at least {required}")]
    TooFewColumns {
        source_name: String,
        kind: DatasetKind,
        found: usize,
        required: usize,
    },

    #[error("{source_name}, data row {row}: missing value for `{column}`")]
    MissingField {
        source_name: String,
        row: usize,
        column: &'static str,
    },
}

/// A dataset loaded fine but holds no rows, so nothing can be drawn
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the {kind} is empty; add rows to the file and restart")]
pub struct EmptyDatasetError {
    pub kind: DatasetKind,
}

/// Either failure a drill can surface to the user
#[derive(Debug, Error)]
pub enum DrillError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Empty(#[from] EmptyDatasetError),
}
