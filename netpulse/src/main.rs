// netpulse/src/main.rs

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG=debug netpulse run ... for per-rule details
    let _guard = logging::init_logging(!cli.no_log_file);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "netpulse starting");

    // `_guard` must outlive every command so the log file gets flushed.
    match cli.command {
        Commands::Run { project_dir } => return commands::run::execute(project_dir),
        Commands::Generate {
            project_dir,
            months,
            sites,
            seed,
        } => commands::generate::execute(project_dir, months, sites, seed)?,
        Commands::Report { project_dir, stage } => {
            commands::report::execute(project_dir, stage.into())?
        }
        Commands::Inspect { file, limit } => commands::inspect::execute(file, limit)?,
        Commands::Clean { project_dir } => commands::clean::execute(project_dir)?,
    }

    Ok(ExitCode::SUCCESS)
}
