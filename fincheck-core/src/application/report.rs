// fincheck-core/src/application/report.rs
//
// Run artifact handed to reporting collaborators: the summary plus the
// forensic list of failed records.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::aggregator::{RecordVerdict, ValidationReport};
use crate::domain::quality::QualitySummary;
use crate::error::FincheckError;
use crate::infrastructure::fs::save_json;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct RunArtifact {
    pub validated_at: String,
    pub source: String,
    pub summary: QualitySummary,
    pub failed_records: Vec<RecordVerdict>,
}

impl RunArtifact {
    pub fn new(report: &ValidationReport, source: &str) -> Self {
        Self {
            validated_at: Utc::now().to_rfc3339(),
            source: source.to_string(),
            summary: report.summary.clone(),
            failed_records: report.failed_verdicts().cloned().collect(),
        }
    }
}

/// Writes `run_results.json` into `output_dir` (created if needed) and
/// returns its path.
pub fn save_run_report(
    output_dir: &Path,
    report: &ValidationReport,
    source: &str,
) -> Result<PathBuf, FincheckError> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let artifact = RunArtifact::new(report, source);
    let path = output_dir.join(RUN_RESULTS_FILE);
    save_json(&path, &artifact)?;

    info!(
        path = ?path,
        failed = artifact.failed_records.len(),
        "Run artifact written"
    );
    Ok(path)
}
