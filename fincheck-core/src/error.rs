// fincheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FincheckError {
    // --- DOMAIN ERRORS (rule configuration) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, ingestion) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl FincheckError {
    /// True for every failure that must abort a run before any record is
    /// processed: invalid rules, unreadable or malformed configuration.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            FincheckError::Domain(_) => true,
            FincheckError::Infrastructure(e) => e.is_configuration_error(),
        }
    }
}

impl From<std::io::Error> for FincheckError {
    fn from(err: std::io::Error) -> Self {
        FincheckError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<crate::infrastructure::error::IngestionError> for FincheckError {
    fn from(err: crate::infrastructure::error::IngestionError) -> Self {
        FincheckError::Infrastructure(InfrastructureError::Ingestion(err))
    }
}
