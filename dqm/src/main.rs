// dqm/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use dqm_core::DqmError;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::check::CheckArgs;

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing) on stderr, stdout is for the summary.
    // RUST_LOG=debug dqm check ... to see every check family
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            data,
            config,
            name,
            report_dir,
            format,
            fail_under,
        } => commands::check::execute(CheckArgs {
            data,
            config,
            name,
            report_dir,
            format,
            fail_under,
        }),
        Commands::Inspect { data, limit } => commands::inspect::execute(data, limit),
    };

    if let Err(err) = result {
        eprintln!("\n❌ {:#}", err);
        // Domain/infra errors carry a miette help line worth showing
        if let Some(help) = err.downcast_ref::<DqmError>().and_then(|e| e.help()) {
            eprintln!("👉 {}", help);
        }
        std::process::exit(1);
    }

    Ok(())
}
