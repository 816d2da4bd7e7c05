// netpulse/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use netpulse_core::domain::quality::Stage;

#[derive(Parser)]
#[command(name = "netpulse")]
#[command(about = "Telecom network KPI batch ETL with data quality gates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Only log to the console (skip logs/etl.log)
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the ETL (Extract -> Raw DQ -> Aggregate -> Curated DQ -> Publish)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧪 Generates synthetic raw facts and reference dimensions
    Generate {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Number of months, starting 2024-01
        #[arg(long, default_value = "24")]
        months: u32,

        /// Number of network sites
        #[arg(long, default_value = "120")]
        sites: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// 📊 Shows the latest data quality report of a stage
    Report {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, value_enum, default_value = "raw")]
        stage: StageArg,
    },

    /// 🔍 Inspects a CSV file (columns + sample rows)
    Inspect {
        /// Path to the CSV file
        #[arg(long, short)]
        file: PathBuf,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Cleans curated outputs and quality reports
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Raw,
    Curated,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Raw => Stage::Raw,
            StageArg::Curated => Stage::Curated,
        }
    }
}
