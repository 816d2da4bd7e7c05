// netpulse-core/src/application/pipeline.rs

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::domain::kpi::{CURATED_GRAIN, KpiAggregator, RAW_GRAIN};
use crate::domain::project::{ProjectConfig, QualityThresholds};
use crate::domain::quality::{QualityValidator, Stage, ValidationReport};
use crate::error::NetpulseError;
use crate::ports::{CuratedPublisher, KpiSource, ReportSink};

/// Terminal state of one run.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    Published,
    AbortedAtRawValidation,
    AbortedAtCuratedValidation,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunSummary {
    pub outcome: PipelineOutcome,
    pub started_at: String,
    pub finished_at: String,
    pub raw_rows: usize,
    pub curated_rows: Option<usize>,
    pub raw_report: ValidationReport,
    pub curated_report: Option<ValidationReport>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.outcome == PipelineOutcome::Published
    }

    /// Report of the stage that stopped the run, if any.
    pub fn blocking_report(&self) -> Option<&ValidationReport> {
        match self.outcome {
            PipelineOutcome::Published => None,
            PipelineOutcome::AbortedAtRawValidation => Some(&self.raw_report),
            PipelineOutcome::AbortedAtCuratedValidation => self.curated_report.as_ref(),
        }
    }
}

/// Sequences extract -> validate(raw) -> aggregate -> validate(curated) ->
/// publish. Any critical violation ends the run; nothing is retried.
pub struct Pipeline<'a> {
    validator: QualityValidator,
    source: &'a dyn KpiSource,
    publisher: &'a dyn CuratedPublisher,
    reports: &'a dyn ReportSink,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        thresholds: &QualityThresholds,
        source: &'a dyn KpiSource,
        publisher: &'a dyn CuratedPublisher,
        reports: &'a dyn ReportSink,
    ) -> Self {
        Self {
            validator: QualityValidator::new(thresholds.clone()),
            source,
            publisher,
            reports,
        }
    }

    pub fn run(&self) -> Result<RunSummary, NetpulseError> {
        let started_at = chrono::Utc::now().to_rfc3339();
        info!("ETL pipeline started");

        // 1. EXTRACT (site level)
        let raw = self.source.extract_raw()?;
        info!(rows = raw.len(), "Extracted raw rows");

        // 2. RAW QUALITY GATE
        let raw_report = self.validator.validate(&raw, &RAW_GRAIN)?;
        self.emit(&raw_report, Stage::Raw);

        if !raw_report.passed {
            error!(
                critical_failures = raw_report.critical_failures,
                "RAW data quality validation FAILED, pipeline aborted"
            );
            return Ok(RunSummary {
                outcome: PipelineOutcome::AbortedAtRawValidation,
                started_at,
                finished_at: chrono::Utc::now().to_rfc3339(),
                raw_rows: raw.len(),
                curated_rows: None,
                raw_report,
                curated_report: None,
            });
        }
        info!(coverage_pct = raw_report.coverage_pct, "RAW data quality validation PASSED");

        // 3. TRANSFORM (executive grain)
        let curated = KpiAggregator::aggregate(&raw)?;
        info!(rows = curated.len(), "Curated rows after transform");

        // 4. CURATED QUALITY GATE
        let curated_report = self.validator.validate(&curated, &CURATED_GRAIN)?;
        self.emit(&curated_report, Stage::Curated);

        if !curated_report.passed {
            error!(
                critical_failures = curated_report.critical_failures,
                "CURATED data quality validation FAILED, pipeline aborted"
            );
            return Ok(RunSummary {
                outcome: PipelineOutcome::AbortedAtCuratedValidation,
                started_at,
                finished_at: chrono::Utc::now().to_rfc3339(),
                raw_rows: raw.len(),
                curated_rows: Some(curated.len()),
                raw_report,
                curated_report: Some(curated_report),
            });
        }
        info!(
            coverage_pct = curated_report.coverage_pct,
            "CURATED data quality validation PASSED"
        );

        // 5. PUBLISH
        self.publisher.publish(&curated)?;
        info!("Curated dataset successfully published");

        Ok(RunSummary {
            outcome: PipelineOutcome::Published,
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
            raw_rows: raw.len(),
            curated_rows: Some(curated.len()),
            raw_report,
            curated_report: Some(curated_report),
        })
    }

    // A sink failure is logged and swallowed: the gate decision is already made.
    fn emit(&self, report: &ValidationReport, stage: Stage) {
        for v in &report.violations {
            warn!(%stage, rule_id = %v.rule_id, severity = %v.severity, "{}", v.message);
        }
        if let Err(e) = self.reports.emit_report(report, stage) {
            error!(%stage, error = %e, "Could not persist data quality report");
        }
    }
}

/// Convenience entry point wiring thresholds from the project config.
pub fn run_pipeline(
    config: &ProjectConfig,
    source: &dyn KpiSource,
    publisher: &dyn CuratedPublisher,
    reports: &dyn ReportSink,
) -> Result<RunSummary, NetpulseError> {
    Pipeline::new(&config.quality, source, publisher, reports).run()
}
