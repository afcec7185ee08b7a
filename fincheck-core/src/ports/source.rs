// fincheck-core/src/ports/source.rs

// What the validation core needs from an ingestion collaborator, without
// knowing whether the records come from a CSV file, a database query or memory.

use crate::domain::record::TransactionRecord;
use crate::error::FincheckError;

pub trait RecordSource: Send + Sync {
    /// Loads the complete batch. Ingestion failures are returned as-is: the
    /// caller never validates a partially loaded batch.
    fn load(&self) -> Result<Vec<TransactionRecord>, FincheckError>;

    /// Human-readable origin of the batch (path, query name...).
    fn describe(&self) -> String;
}

impl RecordSource for Vec<TransactionRecord> {
    fn load(&self) -> Result<Vec<TransactionRecord>, FincheckError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory batch ({} records)", self.len())
    }
}
