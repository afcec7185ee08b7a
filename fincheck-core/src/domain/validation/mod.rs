// fincheck-core/src/domain/validation/mod.rs

pub mod validators;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::record::{Field, TransactionRecord};

pub use validators::{
    check_account_id, check_amount, check_currency, check_duplicates, check_mandatory_fields,
    check_timestamp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    MandatoryFields,
    AmountRange,
    CurrencyCodes,
    DuplicateTransactions,
    TimestampFormat,
    AccountIdFormat,
}

impl RuleName {
    /// Evaluation order of the rules, also the order of per-rule statistics.
    pub const ALL: [RuleName; 6] = [
        RuleName::MandatoryFields,
        RuleName::AmountRange,
        RuleName::CurrencyCodes,
        RuleName::DuplicateTransactions,
        RuleName::TimestampFormat,
        RuleName::AccountIdFormat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MandatoryFields => "mandatory_fields",
            Self::AmountRange => "amount_range",
            Self::CurrencyCodes => "currency_codes",
            Self::DuplicateTransactions => "duplicate_transactions",
            Self::TimestampFormat => "timestamp_format",
            Self::AccountIdFormat => "account_id_format",
        }
    }

    /// The single field a rule inspects. Mandatory-field failures name their
    /// missing fields individually.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MandatoryFields => None,
            Self::AmountRange => Some(Field::Amount),
            Self::CurrencyCodes => Some(Field::Currency),
            Self::DuplicateTransactions => Some(Field::TransactionId),
            Self::TimestampFormat => Some(Field::Timestamp),
            Self::AccountIdFormat => Some(Field::AccountId),
        }
    }

    /// Contribution of the rule to the quality score.
    pub fn weight(&self) -> f64 {
        match self {
            Self::MandatoryFields => 0.30,
            Self::AmountRange => 0.20,
            Self::CurrencyCodes => 0.15,
            Self::DuplicateTransactions => 0.20,
            Self::TimestampFormat => 0.10,
            Self::AccountIdFormat => 0.05,
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one rule on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub row: usize,
    pub transaction_id: Option<String>,
    pub rule: RuleName,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_fields: Vec<Field>,
}

impl ValidationResult {
    pub fn pass(record: &TransactionRecord, rule: RuleName) -> Self {
        Self {
            row: record.row,
            transaction_id: record.transaction_id.clone(),
            rule,
            passed: true,
            reason: None,
            failed_fields: Vec::new(),
        }
    }

    pub fn fail(record: &TransactionRecord, rule: RuleName, reason: impl Into<String>) -> Self {
        Self {
            row: record.row,
            transaction_id: record.transaction_id.clone(),
            rule,
            passed: false,
            reason: Some(reason.into()),
            failed_fields: rule.field().into_iter().collect(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.failed_fields = fields;
        self
    }
}
