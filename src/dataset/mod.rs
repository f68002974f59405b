pub mod demo;
pub mod entry;
pub mod loader;

pub use entry::{QuizEntry, Record, Row, WordEntry};
pub use loader::{load_dataset, SourceFormat};

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EmptyDatasetError;

/// Immutable, ordered rows of one data file. A row's identity is its index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    entries: Vec<T>,
    source_name: String,
}

impl<T: Record> Dataset<T> {
    pub fn from_entries(entries: Vec<T>, source_name: impl Into<String>) -> Self {
        Self {
            entries,
            source_name: source_name.into(),
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Uniform draw with replacement over all rows
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, EmptyDatasetError> {
        self.entries.choose(rng).ok_or_else(|| {
            warn!("cannot draw from empty {} ({})", T::KIND, self.source_name);
            EmptyDatasetError { kind: T::KIND }
        })
    }
}
