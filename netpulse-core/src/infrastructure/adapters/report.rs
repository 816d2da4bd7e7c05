// netpulse-core/src/infrastructure/adapters/report.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::quality::{Stage, ValidationReport};
use crate::error::NetpulseError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::save_json;
use crate::ports::ReportSink;

/// Persists each report as `dq_{stage}_{YYYY_MM}.json` in a directory.
/// A later run in the same month replaces the file.
pub struct JsonReportSink {
    dir: PathBuf,
    period: String,
}

impl JsonReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_period(dir, chrono::Local::now().format("%Y_%m").to_string())
    }

    pub fn with_period(dir: impl Into<PathBuf>, period: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            period: period.into(),
        }
    }

    pub fn report_path(&self, stage: Stage) -> PathBuf {
        self.dir.join(format!("dq_{}_{}.json", stage, self.period))
    }
}

impl ReportSink for JsonReportSink {
    fn emit_report(&self, report: &ValidationReport, stage: Stage) -> Result<(), NetpulseError> {
        let path = self.report_path(stage);
        save_json(&path, report)?;
        info!(%stage, path = ?path, "DQ report saved");
        Ok(())
    }
}

/// Most recent report for `stage` in `dir`. Periods are zero-padded, so the
/// lexicographically greatest file name is the latest one.
pub fn load_latest_report(
    dir: &Path,
    stage: Stage,
) -> Result<Option<(PathBuf, ValidationReport)>, InfrastructureError> {
    if !dir.exists() {
        return Ok(None);
    }

    let prefix = format!("dq_{}_", stage);
    let mut latest: Option<PathBuf> = None;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".json"));
        if matches && latest.as_ref().is_none_or(|l| path > *l) {
            latest = Some(path);
        }
    }

    match latest {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let report = serde_json::from_str(&content)?;
            Ok(Some((path, report)))
        }
        None => Ok(None),
    }
}
