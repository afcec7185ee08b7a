// fincheck/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug fincheck validate ... to see rule compilation and ingestion details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            input,
            project_dir,
            config,
            output_dir,
            fail_on,
        } => commands::validate::execute(input, project_dir, config, output_dir, fail_on),

        Commands::CheckConfig {
            project_dir,
            config,
        } => commands::check_config::execute(project_dir, config),
    }
}
