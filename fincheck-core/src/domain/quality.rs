// fincheck-core/src/domain/quality.rs

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::validation::RuleName;

// Ordered from best to worst so that `status >= QualityStatus::Warning`
// reads as "at least a warning".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStatus {
    Ok,
    Warning,
    Critical,
}

impl QualityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_threshold_order"))]
pub struct QualityThresholds {
    #[validate(range(min = 0.0, max = 1.0))]
    pub critical_pass_rate: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub warning_pass_rate: f64,
}

impl QualityThresholds {
    /// `pass_rate >= critical` is OK, `pass_rate >= warning` is WARNING,
    /// anything lower is CRITICAL.
    pub fn classify(&self, pass_rate: f64) -> QualityStatus {
        if pass_rate >= self.critical_pass_rate {
            QualityStatus::Ok
        } else if pass_rate >= self.warning_pass_rate {
            QualityStatus::Warning
        } else {
            QualityStatus::Critical
        }
    }
}

fn validate_threshold_order(thresholds: &QualityThresholds) -> Result<(), ValidationError> {
    // NaN slips through the range checks, which only reject values that compare.
    if !thresholds.critical_pass_rate.is_finite() || !thresholds.warning_pass_rate.is_finite() {
        let mut err = ValidationError::new("threshold_finite");
        err.message = Some(Cow::Borrowed("Pass-rate thresholds must be finite numbers"));
        return Err(err);
    }
    if thresholds.warning_pass_rate > thresholds.critical_pass_rate {
        let mut err = ValidationError::new("threshold_order");
        err.message = Some(Cow::Owned(format!(
            "warning_pass_rate ({}) must not exceed critical_pass_rate ({})",
            thresholds.warning_pass_rate, thresholds.critical_pass_rate
        )));
        return Err(err);
    }
    Ok(())
}

/// Outcome counts of a single rule across the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStats {
    pub rule: RuleName,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

impl CheckStats {
    pub fn new(rule: RuleName, total: usize, passed: usize) -> Self {
        Self {
            rule,
            total,
            passed,
            failed: total - passed,
            pass_rate: ratio(passed, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub total_records: usize,
    pub passed_records: usize,
    pub failed_records: usize,
    pub pass_rate: f64,
    pub status: QualityStatus,
    /// Weighted mean of the per-rule pass rates, scaled to 0..=100.
    pub quality_score: f64,
    pub checks: Vec<CheckStats>,
}

impl QualitySummary {
    pub fn new(
        total_records: usize,
        passed_records: usize,
        checks: Vec<CheckStats>,
        thresholds: &QualityThresholds,
    ) -> Self {
        let pass_rate = ratio(passed_records, total_records);
        Self {
            total_records,
            passed_records,
            failed_records: total_records - passed_records,
            pass_rate,
            status: thresholds.classify(pass_rate),
            quality_score: weighted_score(&checks),
            checks,
        }
    }
}

// An empty batch has nothing that passed: 0.0, not NaN.
fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn weighted_score(checks: &[CheckStats]) -> f64 {
    let (weighted, total_weight) = checks.iter().fold((0.0, 0.0), |(acc, w), check| {
        let weight = check.rule.weight();
        (acc + check.pass_rate * weight, w + weight)
    });
    if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        0.0
    }
}
