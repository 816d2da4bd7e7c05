// netpulse/src/commands/report.rs
//
// USE CASE: Show the latest data quality report of a stage.

use std::path::PathBuf;

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use netpulse_core::domain::quality::Stage;
use netpulse_core::infrastructure::adapters::load_latest_report;
use netpulse_core::infrastructure::config::load_project_config;

pub fn execute(project_dir: PathBuf, stage: Stage) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir)?;
    let quality_dir = config.quality_dir(&project_dir);

    let Some((path, report)) = load_latest_report(&quality_dir, stage)? else {
        anyhow::bail!(
            "❌ No {} report found in {}\n👉 Have you run 'netpulse run'?",
            stage,
            quality_dir.display()
        );
    };

    println!("\n📊 Data Quality Report ({}): {}", stage, path.display());

    let mut summary = Table::new();
    summary.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    summary.add_row(vec![
        "Status".to_string(),
        if report.passed { "PASSED ✅" } else { "FAILED ❌" }.to_string(),
    ]);
    summary.add_row(vec!["Total rules".to_string(), report.total_rules.to_string()]);
    summary.add_row(vec!["Failed rules".to_string(), report.failed_rules.to_string()]);
    summary.add_row(vec![
        "Critical failures".to_string(),
        report.critical_failures.to_string(),
    ]);
    summary.add_row(vec![
        "Warning failures".to_string(),
        report.warning_failures.to_string(),
    ]);
    summary.add_row(vec!["Coverage".to_string(), format!("{}%", report.coverage_pct)]);
    println!("{summary}");

    if report.violations.is_empty() {
        println!("✨ No violations.");
        return Ok(());
    }

    let mut violations = Table::new();
    violations
        .load_preset(UTF8_FULL)
        .set_header(vec!["Rule", "Severity", "Message"]);
    for v in &report.violations {
        violations.add_row(vec![
            v.rule_id.clone(),
            v.severity.to_string(),
            v.message.clone(),
        ]);
    }
    println!("{violations}");

    Ok(())
}
