// fincheck-core/src/infrastructure/adapters/csv_source.rs

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::domain::record::{Field, TransactionRecord};
use crate::error::FincheckError;
use crate::infrastructure::error::IngestionError;
use crate::ports::source::RecordSource;

/// Reads a headered CSV file. Columns may appear in any order and extra
/// columns are ignored; blank cells become `None`.
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn csv_error(&self, source: csv::Error) -> IngestionError {
        IngestionError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSource for CsvRecordSource {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> Result<Vec<TransactionRecord>, FincheckError> {
        if !self.path.is_file() {
            return Err(IngestionError::NotFound(self.path.clone()).into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        let mut columns = [0usize; 5];
        for (slot, field) in columns.iter_mut().zip(Field::ALL) {
            *slot = headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == field.as_str())
                .ok_or_else(|| IngestionError::MissingColumn {
                    path: self.path.clone(),
                    column: field.as_str().to_string(),
                })?;
        }
        debug!(?columns, "Resolved CSV column positions");

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let line = result.map_err(|e| self.csv_error(e))?;
            let cell = |idx: usize| line.get(columns[idx]);
            records.push(TransactionRecord::new(
                row,
                cell(0),
                cell(1),
                cell(2),
                cell(3),
                cell(4),
            ));
        }

        info!(count = records.len(), "Transactions loaded");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
