// fincheck-core/src/infrastructure/config/loader.rs

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::rules::{CurrencyReference, QualityConfig, RuleSet};
use crate::error::FincheckError;
use crate::infrastructure::error::InfrastructureError;

pub const CRITICAL_PASS_RATE_ENV: &str = "FINCHECK_CRITICAL_PASS_RATE";
pub const WARNING_PASS_RATE_ENV: &str = "FINCHECK_WARNING_PASS_RATE";

const CONFIG_CANDIDATES: [&str; 3] = [
    "config/data_quality_config.json",
    "config/data_quality_config.yaml",
    "fincheck.yaml",
];

/// Loads the rule configuration, its currency reference and environment
/// overrides, and compiles them into a `RuleSet`.
///
/// Relative paths (the explicit `config_path` as well as
/// `currency_validation.config_file`) are resolved against `project_dir`.
#[instrument(skip(project_dir))]
pub fn load_rule_set(
    project_dir: &Path,
    config_path: Option<&Path>,
) -> Result<RuleSet, FincheckError> {
    let path = match config_path {
        Some(p) => resolve(project_dir, p),
        None => find_main_config(project_dir)?,
    };
    if !path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(format!(
            "Rule configuration {:?} does not exist",
            path
        ))
        .into());
    }
    info!(path = ?path, "Loading rule configuration");

    let mut config: QualityConfig = load_document(&path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    let currency_file = config.validation_rules.currency_validation.config_file.trim();
    if currency_file.is_empty() {
        return Err(InfrastructureError::ConfigError(
            "currency_validation.config_file cannot be empty".to_string(),
        )
        .into());
    }
    let currency_path = resolve(project_dir, Path::new(currency_file));
    if !currency_path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(format!(
            "Currency reference {:?} does not exist",
            currency_path
        ))
        .into());
    }
    let currencies: CurrencyReference = load_document(&currency_path)?;
    info!(
        path = ?currency_path,
        count = currencies.approved_currencies.len(),
        "Approved currencies loaded"
    );

    Ok(RuleSet::from_config(config, currencies)?)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|p| p.is_file())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "No configuration file found in {:?}. Checked: {:?}",
                root, CONFIG_CANDIDATES
            ))
        })
}

fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

/// Reads a typed document: YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path).map_err(|e| {
        InfrastructureError::ConfigError(format!("Cannot read {:?}: {}", path, e))
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| InfrastructureError::JsonError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Threshold overrides layered on top of the file, e.g.
/// `FINCHECK_CRITICAL_PASS_RATE=0.99 fincheck validate ...`.
/// Range checks happen later, with the rest of the rule validation.
pub fn apply_env_overrides<F>(config: &mut QualityConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let thresholds = &mut config.data_quality_thresholds;
    if let Some(raw) = lookup(CRITICAL_PASS_RATE_ENV) {
        let value = parse_rate(CRITICAL_PASS_RATE_ENV, &raw)?;
        info!(old = thresholds.critical_pass_rate, new = value, "Overriding critical pass rate via ENV");
        thresholds.critical_pass_rate = value;
    }
    if let Some(raw) = lookup(WARNING_PASS_RATE_ENV) {
        let value = parse_rate(WARNING_PASS_RATE_ENV, &raw)?;
        info!(old = thresholds.warning_pass_rate, new = value, "Overriding warning pass rate via ENV");
        thresholds.warning_pass_rate = value;
    }
    Ok(())
}

fn parse_rate(key: &str, raw: &str) -> Result<f64, InfrastructureError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InfrastructureError::ConfigError(format!(
            "{} must be a finite number, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use anyhow::Result;
    use tempfile::{TempDir, tempdir};

    const CONFIG: &str = r#"{
        "validation_rules": {
            "mandatory_fields": ["transaction_id", "account_id", "amount", "currency", "timestamp"],
            "amount_validation": { "min_value": 0.01, "max_value": 1000000.00 },
            "currency_validation": { "config_file": "config/currencies.json" },
            "timestamp_validation": { "format": "%Y-%m-%d %H:%M:%S", "max_future_days": 1 }
        },
        "data_quality_thresholds": { "critical_pass_rate": 0.95, "warning_pass_rate": 0.90 }
    }"#;

    const CURRENCIES: &str = r#"{ "approved_currencies": ["USD", "EUR", "GBP"] }"#;

    fn project(config: &str, currencies: &str) -> Result<TempDir> {
        let dir = tempdir()?;
        let config_dir = dir.path().join("config");
        fs::create_dir_all(&config_dir)?;
        fs::write(config_dir.join("data_quality_config.json"), config)?;
        fs::write(config_dir.join("currencies.json"), currencies)?;
        Ok(dir)
    }

    #[test]
    fn test_load_discovers_default_config() -> Result<()> {
        let dir = project(CONFIG, CURRENCIES)?;
        let rules = load_rule_set(dir.path(), None)?;
        assert!(rules.currency().is_approved("GBP"));
        assert!(!rules.currency().is_approved("JPY"));
        Ok(())
    }

    #[test]
    fn test_load_yaml_config() -> Result<()> {
        let dir = project(CONFIG, CURRENCIES)?;
        let yaml = r#"
validation_rules:
  mandatory_fields: [transaction_id, amount]
  amount_validation: { min_value: 1, max_value: 10 }
  currency_validation: { config_file: config/currencies.json }
  timestamp_validation: { format: "%Y-%m-%d", max_future_days: 0 }
  duplicate_validation: { policy: all_but_first }
data_quality_thresholds: { critical_pass_rate: 0.9, warning_pass_rate: 0.8 }
"#;
        fs::write(dir.path().join("rules.yaml"), yaml)?;
        let rules = load_rule_set(dir.path(), Some(Path::new("rules.yaml")))?;
        assert_eq!(rules.mandatory_fields().len(), 2);
        assert_eq!(rules.amount().max_value, rust_decimal::Decimal::TEN);
        Ok(())
    }

    #[test]
    fn test_missing_config_is_configuration_error() -> Result<()> {
        let dir = tempdir()?;
        let err = load_rule_set(dir.path(), None).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(
            err,
            FincheckError::Infrastructure(InfrastructureError::ConfigNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_currency_reference() -> Result<()> {
        let dir = project(CONFIG, CURRENCIES)?;
        fs::remove_file(dir.path().join("config/currencies.json"))?;
        let err = load_rule_set(dir.path(), None).unwrap_err();
        assert!(err.is_configuration_error());
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_configuration_error() -> Result<()> {
        let dir = project("{ not json", CURRENCIES)?;
        let err = load_rule_set(dir.path(), None).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(
            err,
            FincheckError::Infrastructure(InfrastructureError::JsonError { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_empty_currency_list_rejected() -> Result<()> {
        let dir = project(CONFIG, r#"{ "approved_currencies": [] }"#)?;
        let err = load_rule_set(dir.path(), None).unwrap_err();
        assert!(matches!(
            err,
            FincheckError::Domain(DomainError::Configuration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let mut config: QualityConfig = serde_json::from_str(CONFIG)?;
        apply_env_overrides(&mut config, |key| match key {
            CRITICAL_PASS_RATE_ENV => Some("0.99".to_string()),
            _ => None,
        })?;
        assert_eq!(config.data_quality_thresholds.critical_pass_rate, 0.99);
        assert_eq!(config.data_quality_thresholds.warning_pass_rate, 0.90);

        let err = apply_env_overrides(&mut config, |key| match key {
            WARNING_PASS_RATE_ENV => Some("high".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(err.is_configuration_error());
        Ok(())
    }

    #[test]
    fn test_env_override_rejects_non_finite_rates() -> Result<()> {
        for raw in ["NaN", "inf", "-inf"] {
            let mut config: QualityConfig = serde_json::from_str(CONFIG)?;
            let err = apply_env_overrides(&mut config, |key| match key {
                CRITICAL_PASS_RATE_ENV => Some(raw.to_string()),
                _ => None,
            })
            .unwrap_err();
            assert!(err.is_configuration_error(), "{} should be rejected", raw);
            assert_eq!(config.data_quality_thresholds.critical_pass_rate, 0.95);
        }
        Ok(())
    }

    #[test]
    fn test_yaml_nan_threshold_rejected() -> Result<()> {
        let dir = project(CONFIG, CURRENCIES)?;
        let yaml = r#"
validation_rules:
  mandatory_fields: [transaction_id]
  amount_validation: { min_value: 1, max_value: 10 }
  currency_validation: { config_file: config/currencies.json }
  timestamp_validation: { format: "%Y-%m-%d", max_future_days: 0 }
data_quality_thresholds: { critical_pass_rate: .nan, warning_pass_rate: 0.8 }
"#;
        fs::write(dir.path().join("rules.yaml"), yaml)?;
        let err = load_rule_set(dir.path(), Some(Path::new("rules.yaml"))).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(
            err,
            FincheckError::Domain(DomainError::InvalidRules(_))
        ));
        Ok(())
    }

    #[test]
    fn test_unreadable_document_is_configuration_error() -> Result<()> {
        let dir = tempdir()?;
        // A directory cannot be read as a document.
        let err = load_document::<CurrencyReference>(dir.path()).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, InfrastructureError::ConfigError(_)));
        Ok(())
    }
}
