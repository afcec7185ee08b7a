// fincheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Configuration Error: {0}")]
    #[diagnostic(
        code(fincheck::domain::configuration),
        help("Check the 'validation_rules' and 'data_quality_thresholds' sections.")
    )]
    Configuration(String),

    #[error("Invalid rule configuration: {0}")]
    #[diagnostic(code(fincheck::domain::rules))]
    InvalidRules(#[from] validator::ValidationErrors),

    #[error("Invalid account ID pattern '{pattern}': {source}")]
    #[diagnostic(
        code(fincheck::domain::pattern),
        help("The pattern must be a valid regular expression matching the whole account ID.")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
