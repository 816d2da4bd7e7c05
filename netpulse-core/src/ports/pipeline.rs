// netpulse-core/src/ports/pipeline.rs

// What the pipeline needs from the outside world, without knowing whether
// rows come from a CSV file, a warehouse or a test fixture.

use crate::domain::dataset::Dataset;
use crate::domain::quality::{Stage, ValidationReport};
use crate::error::NetpulseError;

/// Supplies the raw site-level KPI fact.
pub trait KpiSource {
    fn extract_raw(&self) -> Result<Dataset, NetpulseError>;
}

/// Durably persists the curated dataset. Only ever called on a fully
/// validated run.
pub trait CuratedPublisher {
    fn publish(&self, dataset: &Dataset) -> Result<(), NetpulseError>;
}

/// Persists or logs a validation report.
pub trait ReportSink {
    fn emit_report(&self, report: &ValidationReport, stage: Stage) -> Result<(), NetpulseError>;
}
