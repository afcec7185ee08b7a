// fincheck-core/src/domain/rules/configuration.rs
//
// Typed mirror of the configuration document. Unknown keys are rejected at
// deserialization, value constraints by `Validate`.

use std::borrow::Cow;

use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::quality::QualityThresholds;
use crate::domain::record::Field;
use crate::domain::rules::DuplicatePolicy;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct QualityConfig {
    #[validate(nested)]
    pub validation_rules: ValidationRules,

    #[validate(nested)]
    pub data_quality_thresholds: QualityThresholds,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct ValidationRules {
    #[validate(length(min = 1, message = "At least one mandatory field is required"))]
    pub mandatory_fields: Vec<Field>,

    #[validate(nested)]
    pub amount_validation: AmountValidation,

    #[validate(nested)]
    pub currency_validation: CurrencyValidation,

    #[validate(nested)]
    pub timestamp_validation: TimestampValidation,

    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id_validation: Option<AccountIdValidation>,

    #[serde(default)]
    pub duplicate_validation: DuplicateValidation,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_amount_bounds"))]
pub struct AmountValidation {
    /// Inclusive bounds. Written as JSON/YAML numbers or, for exact
    /// precision, as strings ("1000000.00").
    pub min_value: Decimal,
    pub max_value: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct CurrencyValidation {
    /// Path of the approved-code reference document, relative to the project.
    #[validate(length(min = 1, message = "Currency reference path cannot be empty"))]
    pub config_file: String,

    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct TimestampValidation {
    #[validate(
        length(min = 1, message = "Timestamp format cannot be empty"),
        custom(function = "validate_strftime")
    )]
    pub format: String,

    pub max_future_days: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct AccountIdValidation {
    #[validate(length(min = 1, message = "Account ID pattern cannot be empty"))]
    pub pattern: String,

    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct DuplicateValidation {
    #[serde(default)]
    pub policy: DuplicatePolicy,
}

/// The approved currency reference document (`{"approved_currencies": [...]}`).
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CurrencyReference {
    pub approved_currencies: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn validate_amount_bounds(amount: &AmountValidation) -> Result<(), ValidationError> {
    if amount.min_value > amount.max_value {
        return Err(invalid(
            "amount_bounds",
            format!(
                "min_value ({}) is greater than max_value ({})",
                amount.min_value, amount.max_value
            ),
        ));
    }
    Ok(())
}

fn validate_strftime(format: &str) -> Result<(), ValidationError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid(
            "timestamp_format",
            format!("'{}' is not a valid strftime format", format),
        ));
    }
    Ok(())
}
