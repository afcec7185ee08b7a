// fincheck-core/src/domain/record.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The attributes of a transaction record that rules can refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TransactionId,
    AccountId,
    Amount,
    Currency,
    Timestamp,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::TransactionId,
        Field::AccountId,
        Field::Amount,
        Field::Currency,
        Field::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionId => "transaction_id",
            Self::AccountId => "account_id",
            Self::Amount => "amount",
            Self::Currency => "currency",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown record field: {}", s))
    }
}

/// One transaction as ingested. Values are kept as raw text so that malformed
/// input (e.g. a non-numeric amount) is reported by the validators instead of
/// being rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Zero-based position of the record in its batch.
    pub row: usize,
    pub transaction_id: Option<String>,
    pub account_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub timestamp: Option<String>,
}

impl TransactionRecord {
    /// Builds a record. Values are trimmed; empty or whitespace-only values
    /// become `None`.
    pub fn new(
        row: usize,
        transaction_id: Option<&str>,
        account_id: Option<&str>,
        amount: Option<&str>,
        currency: Option<&str>,
        timestamp: Option<&str>,
    ) -> Self {
        Self {
            row,
            transaction_id: normalize(transaction_id),
            account_id: normalize(account_id),
            amount: normalize(amount),
            currency: normalize(currency),
            timestamp: normalize(timestamp),
        }
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::TransactionId => &self.transaction_id,
            Field::AccountId => &self.account_id,
            Field::Amount => &self.amount,
            Field::Currency => &self.currency,
            Field::Timestamp => &self.timestamp,
        };
        value.as_deref()
    }

    /// Label used in logs and reasons: the transaction id when present,
    /// otherwise the row position.
    pub fn label(&self) -> String {
        match &self.transaction_id {
            Some(id) => id.clone(),
            None => format!("row {}", self.row),
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_normalizes_blank_values() {
        let record = TransactionRecord::new(0, Some("TXN1"), Some("  "), Some(""), None, Some("x"));
        assert_eq!(record.transaction_id.as_deref(), Some("TXN1"));
        assert_eq!(record.account_id, None);
        assert_eq!(record.amount, None);
        assert_eq!(record.currency, None);
        assert_eq!(record.field(Field::Timestamp), Some("x"));
    }

    #[test]
    fn test_new_trims_values() {
        let record = TransactionRecord::new(0, Some("A "), None, Some(" 10.5 "), Some(" USD"), None);
        assert_eq!(record.transaction_id.as_deref(), Some("A"));
        assert_eq!(record.amount.as_deref(), Some("10.5"));
        assert_eq!(record.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_label_falls_back_to_row() {
        let record = TransactionRecord::new(7, None, None, None, None, None);
        assert_eq!(record.label(), "row 7");
    }

    #[test]
    fn test_field_parsing_consistency() {
        for field in Field::ALL {
            assert_eq!(Field::from_str(field.as_str()), Ok(field));
        }
        assert!(Field::from_str("merchant").is_err());
    }
}
