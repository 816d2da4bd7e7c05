// netpulse/src/commands/generate.rs
//
// USE CASE: Generate synthetic raw facts and reference dimensions.

use std::fs;
use std::path::PathBuf;

use netpulse_core::application::{SampleOptions, generate_sample_data};
use netpulse_core::infrastructure::config::{load_project_config, write_default_config};

const DEFAULT_PROJECT_NAME: &str = "telecom_kpi";

pub fn execute(project_dir: PathBuf, months: u32, sites: u32, seed: u64) -> anyhow::Result<()> {
    println!(
        "🧪 Generating {} months x {} sites of sample data in '{}'...",
        months,
        sites,
        project_dir.display()
    );

    fs::create_dir_all(&project_dir)?;
    let config_path = write_default_config(&project_dir, DEFAULT_PROJECT_NAME)?;
    println!("   Config: {}", config_path.display());

    let config = load_project_config(&project_dir)?;
    let options = SampleOptions {
        months,
        sites,
        seed,
        ..Default::default()
    };
    let summary = generate_sample_data(&project_dir, &config, &options)?;

    println!(
        "📝 {} KPI rows, {} incident rows.",
        summary.kpi_rows, summary.incident_rows
    );
    for file in &summary.files {
        println!("   ➜ {}", file.display());
    }

    println!("✨ Sample data generated successfully!");
    Ok(())
}
