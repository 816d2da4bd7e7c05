// netpulse/src/commands/clean.rs
//
// USE CASE: Remove curated outputs and quality reports.

use std::path::PathBuf;

use anyhow::Context;
use netpulse_core::application::clean_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let removed = clean_project(&project_dir).context("❌ Clean failed")?;

    if removed.is_empty() {
        println!("✨ Nothing to clean.");
    } else {
        for target in &removed {
            println!("   🗑️  {}", target);
        }
        println!("✨ Removed {} target(s).", removed.len());
    }
    Ok(())
}
