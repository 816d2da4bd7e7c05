// netpulse/src/commands/inspect.rs
//
// USE CASE: Inspect a CSV file (columns + sample rows).

use std::path::PathBuf;

use netpulse_core::infrastructure::adapters::DuckDbCsv;

pub fn execute(file: PathBuf, limit: usize) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!(
            "❌ File not found at: {}\n👉 Have you run 'netpulse generate'?",
            file.display()
        );
    }

    let dataset = DuckDbCsv::in_memory()?.read_csv(&file)?;

    println!("\n🔍 Inspecting File: '{}'", file.display());
    println!("   Rows: {}", dataset.len());
    println!("   Columns: [{}]", dataset.columns().join(", "));
    println!("   --- Rows (Limit {}) ---", limit);

    for row in dataset.rows().iter().take(limit) {
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("   ➜ {}", values.join(" | "));
    }

    Ok(())
}
