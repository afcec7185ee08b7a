// fincheck-core/src/infrastructure/error.rs

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum IngestionError {
    #[error("Input file not found: {0}")]
    #[diagnostic(code(fincheck::infra::ingest::not_found))]
    NotFound(PathBuf),

    #[error("Missing column '{column}' in {path}")]
    #[diagnostic(
        code(fincheck::infra::ingest::missing_column),
        help("Expected columns: transaction_id, account_id, amount, currency, timestamp.")
    )]
    MissingColumn { path: PathBuf, column: String },

    #[error("CSV Error in {path}: {source}")]
    #[diagnostic(
        code(fincheck::infra::ingest::csv),
        help("Check the delimiter, quoting and that every row has the same number of fields.")
    )]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- INGESTION (collaborator errors, propagated unmodified) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingestion(#[from] IngestionError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(fincheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG ---
    #[error("JSON Parsing Error in {path}: {source}")]
    #[diagnostic(
        code(fincheck::infra::json),
        help("Check the JSON syntax and that no unknown keys are present.")
    )]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML Parsing Error in {path}: {source}")]
    #[diagnostic(
        code(fincheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(fincheck::infra::config))]
    ConfigError(String),

    #[error("Configuration not found: {0}")]
    #[diagnostic(code(fincheck::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Serialization Error: {0}")]
    #[diagnostic(code(fincheck::infra::serialize))]
    Serialization(String),
}

impl InfrastructureError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            InfrastructureError::JsonError { .. }
                | InfrastructureError::YamlError { .. }
                | InfrastructureError::ConfigError(_)
                | InfrastructureError::ConfigNotFound(_)
        )
    }
}
