// fincheck-core/src/application/aggregator.rs

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::domain::quality::{CheckStats, QualitySummary};
use crate::domain::record::{Field, TransactionRecord};
use crate::domain::rules::RuleSet;
use crate::domain::validation::{
    RuleName, ValidationResult, check_account_id, check_amount, check_currency, check_duplicates,
    check_mandatory_fields, check_timestamp,
};
use crate::error::FincheckError;
use crate::ports::source::RecordSource;

/// Combined outcome of every rule for one record, with the record itself so
/// that failures can be inspected from the run artifact alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordVerdict {
    pub row: usize,
    pub transaction_id: Option<String>,
    pub passed: bool,
    pub failed_rules: Vec<RuleName>,
    /// Fields involved in any failure, first occurrence first.
    pub failed_fields: Vec<Field>,
    pub reasons: Vec<String>,
    pub record: TransactionRecord,
}

impl RecordVerdict {
    fn from_results(record: &TransactionRecord, results: &[ValidationResult]) -> Self {
        let failures: Vec<&ValidationResult> = results.iter().filter(|r| !r.passed).collect();

        let mut failed_fields: Vec<Field> = Vec::new();
        for field in failures.iter().flat_map(|r| r.failed_fields.iter()) {
            if !failed_fields.contains(field) {
                failed_fields.push(*field);
            }
        }

        Self {
            row: record.row,
            transaction_id: record.transaction_id.clone(),
            passed: failures.is_empty(),
            failed_rules: failures.iter().map(|r| r.rule).collect(),
            failed_fields,
            reasons: failures
                .iter()
                .map(|r| {
                    r.reason
                        .clone()
                        .unwrap_or_else(|| format!("{} failed", r.rule))
                })
                .collect(),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One verdict per record, in batch order.
    pub verdicts: Vec<RecordVerdict>,
    /// One result per record and rule, record-major.
    pub results: Vec<ValidationResult>,
    pub summary: QualitySummary,
}

impl ValidationReport {
    pub fn failed_verdicts(&self) -> impl Iterator<Item = &RecordVerdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }

    /// The clean subset of the batch: records that passed every rule.
    pub fn passed_records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.verdicts.iter().filter(|v| v.passed).map(|v| &v.record)
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Validates the batch against the rules, taking "now" from the local clock.
    pub fn run(batch: &[TransactionRecord], rules: &RuleSet) -> ValidationReport {
        Self::run_at(batch, rules, Local::now().naive_local())
    }

    /// Deterministic variant of [`Aggregator::run`]: future-dated timestamps
    /// are judged against `now`.
    #[instrument(skip_all, fields(records = batch.len()))]
    pub fn run_at(
        batch: &[TransactionRecord],
        rules: &RuleSet,
        now: NaiveDateTime,
    ) -> ValidationReport {
        // Batch-scoped rule first; it yields one result per record in order.
        let duplicates = check_duplicates(batch, rules);

        let mut results = Vec::with_capacity(batch.len() * RuleName::ALL.len());
        let mut verdicts = Vec::with_capacity(batch.len());
        let mut passed_per_rule = [0usize; RuleName::ALL.len()];

        for (record, duplicate) in batch.iter().zip(duplicates) {
            // Same order as RuleName::ALL.
            let record_results = [
                check_mandatory_fields(record, rules),
                check_amount(record, rules),
                check_currency(record, rules),
                duplicate,
                check_timestamp(record, rules, now),
                check_account_id(record, rules),
            ];

            for (count, result) in passed_per_rule.iter_mut().zip(&record_results) {
                if result.passed {
                    *count += 1;
                }
            }

            verdicts.push(RecordVerdict::from_results(record, &record_results));
            results.extend(record_results);
        }

        let checks: Vec<CheckStats> = RuleName::ALL
            .into_iter()
            .zip(passed_per_rule)
            .map(|(rule, passed)| CheckStats::new(rule, batch.len(), passed))
            .collect();
        let passed_records = verdicts.iter().filter(|v| v.passed).count();
        let summary = QualitySummary::new(batch.len(), passed_records, checks, rules.thresholds());

        info!(
            total = summary.total_records,
            passed = summary.passed_records,
            failed = summary.failed_records,
            pass_rate = summary.pass_rate,
            status = %summary.status,
            "Validation complete"
        );

        ValidationReport {
            verdicts,
            results,
            summary,
        }
    }
}

/// Loads the whole batch from `source`, then validates it. Ingestion errors
/// abort before any record is judged.
#[instrument(skip_all, fields(source = %source.describe()))]
pub fn run_validation(
    source: &dyn RecordSource,
    rules: &RuleSet,
) -> Result<ValidationReport, FincheckError> {
    let batch = source.load()?;
    if batch.is_empty() {
        warn!("Empty batch, nothing to validate");
    }
    Ok(Aggregator::run(&batch, rules))
}
