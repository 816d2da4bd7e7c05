// netpulse/src/commands/run.rs
//
// USE CASE: Run the KPI ETL with both quality gates.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use miette::Diagnostic;
use netpulse_core::application::{PipelineOutcome, run_pipeline};
use netpulse_core::infrastructure::adapters::{CsvCuratedPublisher, CsvKpiSource, JsonReportSink};
use netpulse_core::infrastructure::config::load_project_config;
use netpulse_core::infrastructure::fs::save_json;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

pub fn execute(project_dir: PathBuf) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);
    println!(
        "   Thresholds: latency <= {} ms, packet loss <= {}%",
        config.quality.latency_max_ms, config.quality.packet_loss_max_pct
    );

    // B. Wire the adapters
    let curated_path = config.curated_kpi_path(&project_dir);
    let quality_dir = config.quality_dir(&project_dir);
    let source = CsvKpiSource::new(config.raw_kpi_path(&project_dir));
    let publisher = CsvCuratedPublisher::new(&curated_path);
    let reports = JsonReportSink::new(&quality_dir);

    // C. Run the Pipeline (Application Layer)
    let summary = match run_pipeline(&config, &source, &publisher, &reports) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            if let Some(code) = e.code() {
                eprintln!("   code: {}", code);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    // D. Run artifact
    let results_path = quality_dir.join(RUN_RESULTS_FILE);
    save_json(&results_path, &summary)
        .with_context(|| format!("Failed to write {}", results_path.display()))?;

    println!("   Raw rows: {}", summary.raw_rows);
    if let Some(rows) = summary.curated_rows {
        println!("   Curated rows: {}", rows);
    }

    let Some(report) = summary.blocking_report() else {
        println!("   Output: {}", curated_path.display());
        println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        return Ok(ExitCode::SUCCESS);
    };

    let stage = match summary.outcome {
        PipelineOutcome::AbortedAtCuratedValidation => "CURATED",
        _ => "RAW",
    };
    eprintln!(
        "\n❌ FAILURE. {} data quality gate blocked the run ({} critical, {} warning).",
        stage, report.critical_failures, report.warning_failures
    );
    for v in &report.violations {
        eprintln!("   [{}] {}: {}", v.severity, v.rule_id, v.message);
    }
    Ok(ExitCode::FAILURE)
}
