use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Range, Reader};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};

use super::{Dataset, Record, Row};
use crate::error::DataLoadError;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// How a data file is read, chosen from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with the given field separator
    Delimited(u8),
    /// First worksheet of an Excel or OpenDocument workbook
    Spreadsheet,
}

impl SourceFormat {
    pub fn of(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            ext if SPREADSHEET_EXTENSIONS.contains(&ext) => Self::Spreadsheet,
            "tsv" | "tab" => Self::Delimited(b'\t'),
            _ => Self::Delimited(b','),
        }
    }
}

/// Load a data file from disk
pub fn load_dataset<T: Record>(path: &Path) -> Result<Dataset<T>, DataLoadError> {
    let io_error = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            DataLoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    };
    let mut file = File::open(path).map_err(io_error)?;
    let source_name = path.display().to_string();

    let dataset = match SourceFormat::of(path) {
        SourceFormat::Delimited(delimiter) => Dataset::<T>::from_reader(file, source_name, delimiter),
        SourceFormat::Spreadsheet => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes).map_err(io_error)?;
            Dataset::<T>::from_spreadsheet(Cursor::new(bytes), source_name)
        }
    };
    match &dataset {
        Ok(d) => info!("loaded {} rows into the {} from {}", d.len(), T::KIND, d.source_name()),
        Err(e) => warn!("failed to load the {}: {e}", T::KIND),
    }
    dataset
}

impl<T: Record> Dataset<T> {
    /// Parse delimited text. The first row is a header and is skipped; only
    /// its width matters, columns are mapped by position.
    pub fn from_reader<R: Read>(
        reader: R,
        source_name: impl Into<String>,
        delimiter: u8,
    ) -> Result<Self, DataLoadError> {
        let source_name = source_name.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(delimiter)
            .from_reader(reader);

        let parse_error = |source: csv::Error| DataLoadError::Parse {
            source_name: source_name.clone(),
            source,
        };

        let columns = reader.headers().map_err(parse_error)?.len();
        check_columns::<T>(columns, &source_name)?;

        let mut entries = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(parse_error)?;
            if let Some(entry) = entry_from_row(&Row::new(&record, columns), idx + 1, &source_name)? {
                entries.push(entry);
            }
        }

        debug!("parsed {} rows ({columns} columns) from {source_name}", entries.len());
        Ok(Self {
            entries,
            source_name,
        })
    }

    /// Read the first worksheet of a workbook with the same rules as
    /// [`Dataset::from_reader`]: one header row, positional columns.
    pub fn from_spreadsheet<RS>(data: RS, source_name: impl Into<String>) -> Result<Self, DataLoadError>
    where
        RS: Read + Seek + Clone,
    {
        let source_name = source_name.into();
        let sheet_error = |source: calamine::Error| DataLoadError::Spreadsheet {
            source_name: source_name.clone(),
            source,
        };

        let mut workbook = open_workbook_auto_from_rs(data).map_err(sheet_error)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(sheet_error)?,
            None => Range::empty(),
        };

        let mut rows = range
            .rows()
            .map(|cells| cells.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        let columns = rows.next().map_or(0, |header| header.len());
        check_columns::<T>(columns, &source_name)?;

        let mut entries = Vec::new();
        for (idx, cells) in rows.enumerate() {
            let row = Row::new(cells.iter().map(String::as_str), columns);
            if let Some(entry) = entry_from_row(&row, idx + 1, &source_name)? {
                entries.push(entry);
            }
        }

        debug!("parsed {} rows ({columns} columns) from worksheet of {source_name}", entries.len());
        Ok(Self {
            entries,
            source_name,
        })
    }
}

fn check_columns<T: Record>(columns: usize, source_name: &str) -> Result<(), DataLoadError> {
    if columns < T::MIN_COLUMNS {
        return Err(DataLoadError::TooFewColumns {
            source_name: source_name.to_owned(),
            kind: T::KIND,
            found: columns,
            required: T::MIN_COLUMNS,
        });
    }
    Ok(())
}

/// `None` for a blank row; `data_row` is 1-based and excludes the header
fn entry_from_row<T: Record>(
    row: &Row<'_>,
    data_row: usize,
    source_name: &str,
) -> Result<Option<T>, DataLoadError> {
    if row.is_blank() {
        return Ok(None);
    }
    T::from_row(row)
        .map(Some)
        .map_err(|column| DataLoadError::MissingField {
            source_name: source_name.to_owned(),
            row: data_row,
            column,
        })
}
