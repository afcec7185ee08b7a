// fincheck/src/commands/validate.rs
//
// USE CASE: Validate a CSV batch and publish the run artifact.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;
use fincheck_core::application::{ValidationReport, run_validation, save_run_report};
use fincheck_core::infrastructure::{CsvRecordSource, load_rule_set};
use fincheck_core::ports::RecordSource;
use tracing::debug;

use crate::cli::FailOn;

const MAX_LISTED_FAILURES: usize = 10;

pub fn execute(
    input: PathBuf,
    project_dir: PathBuf,
    config: Option<PathBuf>,
    output_dir: PathBuf,
    fail_on: FailOn,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Rules (fatal before any record is read)
    println!("⚙️  Loading rule configuration...");
    let rules = load_rule_set(&project_dir, config.as_deref()).with_context(|| {
        format!(
            "Failed to load rule configuration from {:?}",
            project_dir
        )
    })?;

    // B. Ingestion + validation
    let source = CsvRecordSource::new(&input);
    println!("📁 Validating transactions from {}", source.describe());
    let report = run_validation(&source, &rules)
        .with_context(|| format!("Failed to ingest transactions from {:?}", input))?;

    print_summary(&report);

    // C. Run artifact
    let target_dir = project_dir.join(&output_dir);
    debug!(target = ?target_dir, "Publishing run artifact");
    let artifact = save_run_report(&target_dir, &report, &source.describe())
        .with_context(|| format!("Failed to write run results to {:?}", target_dir))?;
    println!("💾 Run results written to {}", artifact.display());

    let summary = &report.summary;
    if fail_on.is_failure(summary.status) {
        eprintln!(
            "\n❌ FAILURE. Quality status {} ({} of {} records failed).",
            summary.status, summary.failed_records, summary.total_records
        );
        std::process::exit(1);
    }

    println!(
        "\n✨ SUCCESS! Quality status {} in {:.2?}",
        summary.status,
        start.elapsed()
    );
    Ok(())
}

fn print_summary(report: &ValidationReport) {
    let summary = &report.summary;

    println!("\n📊 Total Records   : {}", summary.total_records);
    println!("✅ Passed Records  : {}", summary.passed_records);
    println!("❌ Failed Records  : {}", summary.failed_records);
    println!("📈 Pass Rate       : {:.2}%", summary.pass_rate * 100.0);
    println!("🎯 Quality Score   : {:.1}", summary.quality_score);
    println!("🏆 Quality Status  : {}", summary.status);
    println!("🧹 Clean Records   : {}", report.passed_records().count());

    let mut table = Table::new();
    table.set_header(vec!["Validation Check", "Total", "Passed", "Failed", "Pass Rate"]);
    for check in &summary.checks {
        table.add_row(vec![
            check.rule.to_string(),
            check.total.to_string(),
            check.passed.to_string(),
            check.failed.to_string(),
            format!("{:.2}%", check.pass_rate * 100.0),
        ]);
    }
    println!("\n{table}");

    let failed: Vec<_> = report.failed_verdicts().collect();
    if failed.is_empty() {
        return;
    }
    println!("\n🧾 Failed records (first {}):", MAX_LISTED_FAILURES.min(failed.len()));
    for verdict in failed.iter().take(MAX_LISTED_FAILURES) {
        println!(
            "   ➜ {} [{}]: {}",
            verdict.record.label(),
            verdict
                .failed_fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            verdict.reasons.join("; ")
        );
    }
}
