// fincheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use fincheck_core::domain::QualityStatus;

#[derive(Parser)]
#[command(name = "fincheck")]
#[command(about = "Rule-based data quality checks for financial transactions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Quality status from which `validate` exits with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    Warning,
    Critical,
    Never,
}

impl FailOn {
    pub fn is_failure(&self, status: QualityStatus) -> bool {
        match self {
            FailOn::Warning => status >= QualityStatus::Warning,
            FailOn::Critical => status >= QualityStatus::Critical,
            FailOn::Never => false,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔍 Validates a CSV batch of transactions against the configured rules
    Validate {
        /// CSV file with transaction_id, account_id, amount, currency, timestamp columns
        #[arg(long, short)]
        input: PathBuf,

        /// Project directory (config and currency files are resolved from here)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Rule configuration (default: config/data_quality_config.json)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Directory receiving run_results.json, relative to the project
        #[arg(long, default_value = "target")]
        output_dir: PathBuf,

        /// Exit with an error from this quality status on
        #[arg(long, value_enum, default_value = "critical")]
        fail_on: FailOn,
    },

    /// ⚙️  Loads and validates the rule configuration without reading data
    CheckConfig {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Rule configuration (default: config/data_quality_config.json)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}
