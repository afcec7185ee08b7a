// fincheck-core/src/domain/validation/validators.rs
//
// One pure function per rule. Validators never mutate the record or the rule
// set; a failing rule is an outcome, not an error.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;

use crate::domain::record::{Field, TransactionRecord};
use crate::domain::rules::{DuplicatePolicy, RuleSet};
use crate::domain::validation::{RuleName, ValidationResult};

pub fn check_mandatory_fields(record: &TransactionRecord, rules: &RuleSet) -> ValidationResult {
    let missing: Vec<Field> = rules
        .mandatory_fields()
        .iter()
        .copied()
        .filter(|field| record.field(*field).is_none_or(|v| v.trim().is_empty()))
        .collect();

    if missing.is_empty() {
        return ValidationResult::pass(record, RuleName::MandatoryFields);
    }
    let names: Vec<&str> = missing.iter().map(Field::as_str).collect();
    ValidationResult::fail(
        record,
        RuleName::MandatoryFields,
        format!("Missing mandatory field(s): {}", names.join(", ")),
    )
    .with_fields(missing)
}

pub fn check_amount(record: &TransactionRecord, rules: &RuleSet) -> ValidationResult {
    let rule = RuleName::AmountRange;
    let Some(raw) = record.amount.as_deref() else {
        return ValidationResult::fail(record, rule, "Amount is missing");
    };

    let amount = match Decimal::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => {
            return ValidationResult::fail(
                record,
                rule,
                format!("Amount '{}' is not numeric", raw),
            );
        }
    };

    let bounds = rules.amount();
    if bounds.contains(amount) {
        ValidationResult::pass(record, rule)
    } else {
        ValidationResult::fail(
            record,
            rule,
            format!(
                "Amount {} outside allowed range [{}, {}]",
                raw.trim(),
                bounds.min_value,
                bounds.max_value
            ),
        )
    }
}

pub fn check_currency(record: &TransactionRecord, rules: &RuleSet) -> ValidationResult {
    let rule = RuleName::CurrencyCodes;
    match record.currency.as_deref() {
        None => ValidationResult::fail(record, rule, "Currency is missing"),
        Some(code) if rules.currency().is_approved(code) => ValidationResult::pass(record, rule),
        Some(code) => ValidationResult::fail(
            record,
            rule,
            format!(
                "Currency '{}' not in approved list: [{}]",
                code,
                rules.currency().codes().join(", ")
            ),
        ),
    }
}

/// Batch-scoped: returns one result per record, in batch order.
///
/// Records without a transaction id pass here; their absence is reported by
/// the mandatory-field check.
pub fn check_duplicates(batch: &[TransactionRecord], rules: &RuleSet) -> Vec<ValidationResult> {
    let rule = RuleName::DuplicateTransactions;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in batch.iter().filter_map(|r| r.transaction_id.as_deref()) {
        *counts.entry(id).or_insert(0) += 1;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    batch
        .iter()
        .map(|record| {
            let Some(id) = record.transaction_id.as_deref() else {
                return ValidationResult::pass(record, rule);
            };
            let occurrences = counts.get(id).copied().unwrap_or(0);
            let first = seen.insert(id);

            let duplicated = match rules.duplicate_policy() {
                DuplicatePolicy::AllOccurrences => occurrences > 1,
                DuplicatePolicy::AllButFirst => !first,
            };

            if duplicated {
                ValidationResult::fail(
                    record,
                    rule,
                    format!(
                        "Duplicate transaction ID '{}' ({} occurrences)",
                        id, occurrences
                    ),
                )
            } else {
                ValidationResult::pass(record, rule)
            }
        })
        .collect()
}

/// Fails on a missing or unparsable timestamp, or one later than
/// `now + max_future_days`.
pub fn check_timestamp(
    record: &TransactionRecord,
    rules: &RuleSet,
    now: NaiveDateTime,
) -> ValidationResult {
    let rule = RuleName::TimestampFormat;
    let config = rules.timestamp();

    let Some(raw) = record.timestamp.as_deref() else {
        return ValidationResult::fail(record, rule, "Null timestamp");
    };

    let Some(parsed) = parse_timestamp(raw.trim(), &config.format) else {
        return ValidationResult::fail(
            record,
            rule,
            format!(
                "Invalid timestamp '{}' (expected format: {})",
                raw, config.format
            ),
        );
    };

    // A horizon beyond the representable range accepts everything.
    let horizon = now.checked_add_signed(TimeDelta::days(i64::from(config.max_future_days)));
    match horizon {
        Some(limit) if parsed > limit => ValidationResult::fail(
            record,
            rule,
            format!(
                "Timestamp {} too far in future (max {} days)",
                raw, config.max_future_days
            ),
        ),
        _ => ValidationResult::pass(record, rule),
    }
}

pub fn check_account_id(record: &TransactionRecord, rules: &RuleSet) -> ValidationResult {
    let rule = RuleName::AccountIdFormat;
    let account = rules.account_id();
    match record.account_id.as_deref() {
        Some(id) if account.matches(id) => ValidationResult::pass(record, rule),
        Some(id) => {
            let reason = match account.pattern() {
                Some(pattern) => format!(
                    "Invalid account ID format '{}' (expected pattern: {})",
                    id, pattern
                ),
                None => format!("Invalid account ID format '{}'", id),
            };
            ValidationResult::fail(record, rule, reason)
        }
        None => ValidationResult::fail(record, rule, "Account ID is missing"),
    }
}

// Date-only formats resolve to midnight.
fn parse_timestamp(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, format)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
