// fincheck-core/src/domain/rules/mod.rs

pub mod configuration;

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::quality::QualityThresholds;
use crate::domain::record::Field;

pub use configuration::{
    AccountIdValidation, AmountValidation, CurrencyReference, CurrencyValidation,
    DuplicateValidation, QualityConfig, TimestampValidation, ValidationRules,
};

/// Which members of a group sharing a transaction id are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Every occurrence of a duplicated id fails.
    #[default]
    AllOccurrences,
    /// The first occurrence passes, later ones fail.
    AllButFirst,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOccurrences => "all_occurrences",
            Self::AllButFirst => "all_but_first",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountBounds {
    pub min_value: Decimal,
    pub max_value: Decimal,
}

impl AmountBounds {
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min_value && amount <= self.max_value
    }
}

#[derive(Debug, Clone)]
pub struct CurrencyRule {
    approved: HashSet<String>,
    case_sensitive: bool,
}

impl CurrencyRule {
    pub fn is_approved(&self, code: &str) -> bool {
        if self.case_sensitive {
            self.approved.contains(code)
        } else {
            self.approved.contains(&code.to_uppercase())
        }
    }

    /// Approved codes, sorted for stable display.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.approved.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

#[derive(Debug, Clone)]
pub struct TimestampRule {
    pub format: String,
    pub max_future_days: u32,
}

#[derive(Debug, Clone)]
pub struct AccountIdRule {
    pattern: Option<Regex>,
    source: Option<String>,
}

impl AccountIdRule {
    /// Whole-value match against the configured pattern. Without a pattern any
    /// non-blank id is accepted.
    pub fn matches(&self, account_id: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(account_id),
            None => !account_id.trim().is_empty(),
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// The immutable set of rules for one validation run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    mandatory_fields: Vec<Field>,
    amount: AmountBounds,
    currency: CurrencyRule,
    timestamp: TimestampRule,
    account_id: AccountIdRule,
    duplicate_policy: DuplicatePolicy,
    thresholds: QualityThresholds,
}

impl RuleSet {
    /// Validates the configuration and compiles it, together with the
    /// approved currency reference, into a rule set.
    pub fn from_config(
        config: QualityConfig,
        currencies: CurrencyReference,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let QualityConfig {
            validation_rules: rules,
            data_quality_thresholds: thresholds,
        } = config;

        let mut mandatory_fields = Vec::with_capacity(rules.mandatory_fields.len());
        for field in rules.mandatory_fields {
            if !mandatory_fields.contains(&field) {
                mandatory_fields.push(field);
            }
        }

        let case_sensitive = rules.currency_validation.case_sensitive;
        let approved: HashSet<String> = currencies
            .approved_currencies
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(|code| {
                if case_sensitive {
                    code.to_string()
                } else {
                    code.to_uppercase()
                }
            })
            .collect();
        if approved.is_empty() {
            return Err(DomainError::Configuration(
                "The approved currency list is empty".to_string(),
            ));
        }

        let account_id = match rules.account_id_validation {
            Some(validation) => compile_account_rule(&validation)?,
            None => AccountIdRule {
                pattern: None,
                source: None,
            },
        };

        debug!(
            mandatory = mandatory_fields.len(),
            currencies = approved.len(),
            "Rule set compiled"
        );

        Ok(Self {
            mandatory_fields,
            amount: AmountBounds {
                min_value: rules.amount_validation.min_value,
                max_value: rules.amount_validation.max_value,
            },
            currency: CurrencyRule {
                approved,
                case_sensitive,
            },
            timestamp: TimestampRule {
                format: rules.timestamp_validation.format,
                max_future_days: rules.timestamp_validation.max_future_days,
            },
            account_id,
            duplicate_policy: rules.duplicate_validation.policy,
            thresholds,
        })
    }

    pub fn mandatory_fields(&self) -> &[Field] {
        &self.mandatory_fields
    }

    pub fn amount(&self) -> &AmountBounds {
        &self.amount
    }

    pub fn currency(&self) -> &CurrencyRule {
        &self.currency
    }

    pub fn timestamp(&self) -> &TimestampRule {
        &self.timestamp
    }

    pub fn account_id(&self) -> &AccountIdRule {
        &self.account_id
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }
}

fn compile_account_rule(validation: &AccountIdValidation) -> Result<AccountIdRule, DomainError> {
    let pattern = validation.pattern.trim();
    if pattern.is_empty() {
        return Err(DomainError::Configuration(
            "Account ID pattern cannot be empty".to_string(),
        ));
    }

    let regex = RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(!validation.case_sensitive)
        .build()
        .map_err(|source| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(AccountIdRule {
        pattern: Some(regex),
        source: Some(pattern.to_string()),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    pub fn config_json() -> serde_json::Value {
        json!({
            "validation_rules": {
                "mandatory_fields": ["transaction_id", "account_id", "amount", "currency", "timestamp"],
                "amount_validation": { "min_value": 0.01, "max_value": 1000000.00 },
                "currency_validation": { "config_file": "config/currencies.json" },
                "timestamp_validation": { "format": "%Y-%m-%d %H:%M:%S", "max_future_days": 1 },
                "account_id_validation": { "pattern": "ACC\\d{6}" }
            },
            "data_quality_thresholds": { "critical_pass_rate": 0.95, "warning_pass_rate": 0.90 }
        })
    }

    pub fn currencies() -> CurrencyReference {
        CurrencyReference {
            approved_currencies: ["USD", "EUR", "GBP", "JPY", "CAD"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn build(value: serde_json::Value) -> Result<RuleSet, DomainError> {
        let config: QualityConfig = serde_json::from_value(value)
            .map_err(|e| DomainError::Configuration(e.to_string()))?;
        RuleSet::from_config(config, currencies())
    }

    #[allow(clippy::expect_used)]
    pub fn rule_set() -> RuleSet {
        build(config_json()).expect("fixture rule set must be valid")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::{build, config_json, currencies, rule_set};
    use super::*;

    #[test]
    fn test_from_config_compiles_rules() {
        let rules = rule_set();
        assert_eq!(rules.mandatory_fields().len(), 5);
        assert_eq!(rules.amount().min_value, Decimal::new(1, 2));
        assert!(rules.currency().is_approved("USD"));
        assert!(!rules.currency().is_approved("usd"));
        assert_eq!(rules.timestamp().max_future_days, 1);
        assert_eq!(rules.account_id().pattern(), Some("ACC\\d{6}"));
        assert_eq!(rules.duplicate_policy(), DuplicatePolicy::AllOccurrences);
        assert_eq!(rules.thresholds().critical_pass_rate, 0.95);
    }

    #[test]
    fn test_duplicate_mandatory_fields_are_collapsed() {
        let mut value = config_json();
        value["validation_rules"]["mandatory_fields"] = serde_json::json!(["amount", "amount"]);
        let rules = build(value).unwrap();
        assert_eq!(rules.mandatory_fields(), &[Field::Amount]);
    }

    #[test]
    fn test_inverted_amount_bounds_rejected() {
        let mut value = config_json();
        value["validation_rules"]["amount_validation"]["min_value"] = serde_json::json!(10.0);
        value["validation_rules"]["amount_validation"]["max_value"] = serde_json::json!(1.0);
        assert!(matches!(build(value), Err(DomainError::InvalidRules(_))));
    }

    #[test]
    fn test_string_bounds_keep_their_precision() {
        let mut value = config_json();
        value["validation_rules"]["amount_validation"]["max_value"] =
            serde_json::json!("999.999999999999999");
        let rules = build(value).unwrap();
        assert!(rules.amount().contains(Decimal::new(999_999_999_999_999_999, 15)));
        assert!(!rules.amount().contains(Decimal::new(1000, 0)));
    }

    #[test]
    fn test_non_numeric_bound_rejected_at_parse() {
        let mut value = config_json();
        value["validation_rules"]["amount_validation"]["max_value"] = serde_json::json!("lots");
        assert!(matches!(build(value), Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_missing_and_unknown_keys_rejected() {
        let mut missing = config_json();
        missing["validation_rules"]
            .as_object_mut()
            .unwrap()
            .remove("timestamp_validation");
        assert!(build(missing).is_err());

        let mut unknown = config_json();
        unknown["validation_rules"]["merchant_validation"] = serde_json::json!({});
        assert!(build(unknown).is_err());

        let mut bad_field = config_json();
        bad_field["validation_rules"]["mandatory_fields"] = serde_json::json!(["merchant"]);
        assert!(build(bad_field).is_err());
    }

    #[test]
    fn test_empty_mandatory_fields_rejected() {
        let mut value = config_json();
        value["validation_rules"]["mandatory_fields"] = serde_json::json!([]);
        assert!(matches!(build(value), Err(DomainError::InvalidRules(_))));
    }

    #[test]
    fn test_empty_or_invalid_pattern_rejected() {
        let mut empty = config_json();
        empty["validation_rules"]["account_id_validation"]["pattern"] = serde_json::json!("");
        assert!(build(empty).is_err());

        let mut invalid = config_json();
        invalid["validation_rules"]["account_id_validation"]["pattern"] = serde_json::json!("ACC(");
        assert!(matches!(
            build(invalid),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_timestamp_format_rejected() {
        let mut value = config_json();
        value["validation_rules"]["timestamp_validation"]["format"] = serde_json::json!("%Y-%Q");
        assert!(matches!(build(value), Err(DomainError::InvalidRules(_))));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut value = config_json();
        value["data_quality_thresholds"]["warning_pass_rate"] = serde_json::json!(0.99);
        assert!(matches!(build(value), Err(DomainError::InvalidRules(_))));
    }

    #[test]
    fn test_empty_currency_reference_rejected() {
        let config: QualityConfig = serde_json::from_value(config_json()).unwrap();
        let result = RuleSet::from_config(config, CurrencyReference::default());
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let mut value = config_json();
        value["validation_rules"]["currency_validation"]["case_sensitive"] = serde_json::json!(false);
        value["validation_rules"]["account_id_validation"]["case_sensitive"] =
            serde_json::json!(false);
        let rules = build(value).unwrap();
        assert!(rules.currency().is_approved("usd"));
        assert!(rules.account_id().matches("acc123456"));
        assert!(!currencies().approved_currencies.is_empty());
    }

    #[test]
    fn test_account_pattern_is_whole_match() {
        let rules = rule_set();
        assert!(rules.account_id().matches("ACC123456"));
        assert!(!rules.account_id().matches("XACC123456"));
        assert!(!rules.account_id().matches("ACC1234567"));
    }

    #[test]
    fn test_missing_account_section_falls_back_to_non_blank() {
        let mut value = config_json();
        value["validation_rules"]
            .as_object_mut()
            .unwrap()
            .remove("account_id_validation");
        let rules = build(value).unwrap();
        assert_eq!(rules.account_id().pattern(), None);
        assert!(rules.account_id().matches("anything"));
        assert!(!rules.account_id().matches("   "));
    }

    #[test]
    fn test_duplicate_policy_parsed() {
        let mut value = config_json();
        value["validation_rules"]["duplicate_validation"] =
            serde_json::json!({ "policy": "all_but_first" });
        let rules = build(value).unwrap();
        assert_eq!(rules.duplicate_policy(), DuplicatePolicy::AllButFirst);
    }
}
