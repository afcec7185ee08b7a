pub mod error;
pub mod quality;
pub mod record;
pub mod rules;
pub mod validation;

// Re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use quality::{CheckStats, QualityStatus, QualitySummary, QualityThresholds};
pub use record::{Field, TransactionRecord};
pub use rules::{DuplicatePolicy, RuleSet};
pub use validation::{RuleName, ValidationResult};
