// fincheck-core/src/application/mod.rs

pub mod aggregator;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use fincheck_core::application::{Aggregator, run_validation};`
// without knowing the file layout.

pub use aggregator::{Aggregator, RecordVerdict, ValidationReport, run_validation};
pub use report::{RunArtifact, save_run_report};
