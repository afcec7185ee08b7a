// fincheck/src/commands/check_config.rs
//
// USE CASE: Validate the rule configuration without touching any data.

use std::path::PathBuf;

use anyhow::Context;
use fincheck_core::infrastructure::load_rule_set;

pub fn execute(project_dir: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    println!("⚙️  Checking rule configuration...");
    let rules = load_rule_set(&project_dir, config.as_deref()).with_context(|| {
        format!(
            "Invalid rule configuration in project {:?}",
            project_dir
        )
    })?;

    let fields: Vec<&str> = rules.mandatory_fields().iter().map(|f| f.as_str()).collect();
    let currency = rules.currency();
    let timestamp = rules.timestamp();
    let thresholds = rules.thresholds();

    println!("   Mandatory fields : {}", fields.join(", "));
    println!(
        "   Amount range     : [{}, {}]",
        rules.amount().min_value,
        rules.amount().max_value
    );
    println!(
        "   Currencies       : {} ({})",
        currency.codes().join(", "),
        if currency.case_sensitive() { "case-sensitive" } else { "case-insensitive" }
    );
    println!(
        "   Timestamp        : '{}' (max {} days ahead)",
        timestamp.format, timestamp.max_future_days
    );
    println!(
        "   Account ID       : {}",
        rules.account_id().pattern().unwrap_or("any non-blank value")
    );
    println!("   Duplicates       : {}", rules.duplicate_policy().as_str());
    println!(
        "   Thresholds       : OK >= {:.2}%, WARNING >= {:.2}%",
        thresholds.critical_pass_rate * 100.0,
        thresholds.warning_pass_rate * 100.0
    );
    println!("✨ Configuration is valid.");

    Ok(())
}
