// fincheck-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;

pub use adapters::CsvRecordSource;
pub use config::load_rule_set;
pub use error::{InfrastructureError, IngestionError};
