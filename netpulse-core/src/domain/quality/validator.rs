// netpulse-core/src/domain/quality/validator.rs

use std::collections::BTreeSet;

use crate::domain::dataset::{Dataset, Value};
use crate::domain::error::DomainError;
use crate::domain::kpi::{AVG_LATENCY_MS, PACKET_LOSS_PCT};
use crate::domain::project::QualityThresholds;

use super::report::ValidationReport;
use super::rules::{QualityRule, Violation};

/// Applies the fixed rule set to a dataset at a caller-chosen grain.
#[derive(Debug, Clone, Default)]
pub struct QualityValidator {
    thresholds: QualityThresholds,
}

/// Columns resolved up front so that no rule is ever skipped silently.
struct ResolvedColumns {
    grain: Vec<String>,
    grain_idx: Vec<usize>,
    latency: Vec<Option<f64>>,
    packet_loss: Vec<Option<f64>>,
}

impl QualityValidator {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Runs all four rules, in order, without short-circuiting.
    ///
    /// Data problems come back as violations inside the report. Only a broken
    /// contract (empty grain, missing column, text in a measure column) is
    /// returned as an error.
    pub fn validate<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        grain_columns: &[S],
    ) -> Result<ValidationReport, DomainError> {
        let cols = self.resolve(dataset, grain_columns)?;

        let violations: Vec<Violation> = QualityRule::ALL
            .iter()
            .filter_map(|rule| self.check(*rule, dataset, &cols))
            .collect();

        let report = ValidationReport::from_violations(QualityRule::ALL.len(), violations);
        tracing::debug!(
            rows = dataset.len(),
            grain = ?cols.grain,
            failed_rules = report.failed_rules,
            coverage_pct = report.coverage_pct,
            "Validation finished"
        );
        Ok(report)
    }

    fn resolve<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        grain: &[S],
    ) -> Result<ResolvedColumns, DomainError> {
        if grain.is_empty() {
            return Err(DomainError::EmptyGrain);
        }
        Ok(ResolvedColumns {
            grain: grain.iter().map(|c| c.as_ref().to_string()).collect(),
            grain_idx: dataset.column_indices(grain)?,
            latency: dataset.numeric_column(AVG_LATENCY_MS)?,
            packet_loss: dataset.numeric_column(PACKET_LOSS_PCT)?,
        })
    }

    fn check(&self, rule: QualityRule, dataset: &Dataset, cols: &ResolvedColumns) -> Option<Violation> {
        match rule {
            QualityRule::NoNullGrainKeys => {
                let has_null = dataset
                    .keys(&cols.grain_idx)
                    .any(|key| key.iter().any(|v| v.is_null()));
                has_null.then(|| rule.violation("Null values detected in grain columns."))
            }
            QualityRule::NoDuplicateGrain => {
                let mut seen: BTreeSet<Vec<&Value>> = BTreeSet::new();
                let has_duplicate = dataset.keys(&cols.grain_idx).any(|key| !seen.insert(key));
                has_duplicate.then(|| {
                    rule.violation(format!("Duplicate records at grain {:?}", cols.grain))
                })
            }
            QualityRule::LatencyRange => {
                let max = self.thresholds.latency_max_ms;
                out_of_range(&cols.latency, max)
                    .then(|| rule.violation(format!("Latency out of range (0-{max} ms).")))
            }
            QualityRule::PacketLossRange => {
                let max = self.thresholds.packet_loss_max_pct;
                out_of_range(&cols.packet_loss, max)
                    .then(|| rule.violation(format!("Packet loss out of range (0-{max}%).")))
            }
        }
    }
}

/// Nulls are never out of range.
fn out_of_range(values: &[Option<f64>], max: f64) -> bool {
    values.iter().flatten().any(|&v| v < 0.0 || v > max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::kpi::RAW_GRAIN;
    use anyhow::Result;

    const COLUMNS: [&str; 9] = [
        "date_key",
        "site_key",
        "region_key",
        "service_key",
        "vendor_key",
        "uptime_minutes",
        "downtime_minutes",
        "avg_latency_ms",
        "packet_loss_pct",
    ];

    fn row(site: Value, latency: f64, loss: f64) -> Vec<Value> {
        vec![
            Value::Int(202401),
            site,
            Value::Int(1),
            Value::Int(1),
            Value::Int(1),
            Value::Int(40000),
            Value::Int(100),
            Value::Float(latency),
            Value::Float(loss),
        ]
    }

    fn validate(rows: Vec<Vec<Value>>) -> Result<ValidationReport> {
        let ds = Dataset::from_rows(COLUMNS, rows)?;
        Ok(QualityValidator::default().validate(&ds, &RAW_GRAIN)?)
    }

    #[test]
    fn test_clean_dataset_passes_with_full_coverage() -> Result<()> {
        let report = validate(vec![row(Value::Int(1), 20.0, 0.5), row(Value::Int(2), 199.9, 5.0)])?;
        assert!(report.passed);
        assert_eq!(report.coverage_pct, 100.0);
        assert_eq!(report.total_rules, 4);
        assert!(report.violations.is_empty());
        Ok(())
    }

    #[test]
    fn test_null_grain_key_is_critical() -> Result<()> {
        let report = validate(vec![row(Value::Int(1), 20.0, 0.5), row(Value::Null, 20.0, 0.5)])?;
        assert!(!report.passed);
        assert!(report.has_violation("no_null_grain_keys"));
        assert!(!report.has_violation("no_duplicate_grain"));
        Ok(())
    }

    #[test]
    fn test_duplicate_grain_is_critical() -> Result<()> {
        let report = validate(vec![row(Value::Int(1), 20.0, 0.5), row(Value::Int(1), 40.0, 0.1)])?;
        assert!(!report.passed);
        assert_eq!(report.critical_failures, 1);
        let v = &report.violations[0];
        assert_eq!(v.rule_id, "no_duplicate_grain");
        assert!(v.message.contains("site_key"));
        Ok(())
    }

    #[test]
    fn test_duplicate_detection_ignores_int_float_spelling() -> Result<()> {
        let report = validate(vec![row(Value::Int(3), 20.0, 0.5), row(Value::Float(3.0), 20.0, 0.5)])?;
        assert!(report.has_violation("no_duplicate_grain"));
        Ok(())
    }

    #[test]
    fn test_latency_above_max_is_only_a_warning() -> Result<()> {
        let report = validate(vec![row(Value::Int(1), 250.0, 0.5)])?;
        assert!(report.passed);
        assert_eq!(report.warning_failures, 1);
        assert_eq!(report.coverage_pct, 75.0);
        assert_eq!(report.violations[0].message, "Latency out of range (0-200 ms).");
        Ok(())
    }

    #[test]
    fn test_negative_packet_loss_is_flagged() -> Result<()> {
        let report = validate(vec![row(Value::Int(1), 20.0, -0.1)])?;
        assert!(report.has_violation("packet_loss_range"));
        assert!(report.passed);
        Ok(())
    }

    #[test]
    fn test_every_rule_fails_independently() -> Result<()> {
        let report = validate(vec![
            row(Value::Null, 20.0, 0.5),
            row(Value::Int(1), 500.0, 9.0),
            row(Value::Int(1), 20.0, 0.5),
        ])?;
        let ids: Vec<_> = report.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "no_null_grain_keys",
                "no_duplicate_grain",
                "latency_range",
                "packet_loss_range"
            ]
        );
        assert_eq!(report.coverage_pct, 0.0);
        Ok(())
    }

    #[test]
    fn test_null_measures_are_not_out_of_range() -> Result<()> {
        let mut r = row(Value::Int(1), 0.0, 0.0);
        r[7] = Value::Null;
        r[8] = Value::Null;
        let report = validate(vec![r])?;
        assert_eq!(report.coverage_pct, 100.0);
        Ok(())
    }

    #[test]
    fn test_custom_thresholds() -> Result<()> {
        let ds = Dataset::from_rows(COLUMNS, vec![row(Value::Int(1), 150.0, 2.0)])?;
        let validator = QualityValidator::new(QualityThresholds {
            latency_max_ms: 100.0,
            packet_loss_max_pct: 1.0,
        });
        let report = validator.validate(&ds, &RAW_GRAIN)?;
        assert_eq!(report.warning_failures, 2);
        assert_eq!(report.violations[1].message, "Packet loss out of range (0-1%).");
        Ok(())
    }

    #[test]
    fn test_empty_dataset_passes() -> Result<()> {
        let report = validate(vec![])?;
        assert!(report.passed);
        Ok(())
    }

    #[test]
    fn test_missing_grain_column_is_a_contract_error() -> Result<()> {
        let ds = Dataset::from_rows(COLUMNS, vec![row(Value::Int(1), 20.0, 0.5)])?;
        let err = QualityValidator::default()
            .validate(&ds, &["date_key", "cell_key"])
            .unwrap_err();
        assert_eq!(err, DomainError::MissingColumn("cell_key".into()));
        Ok(())
    }

    #[test]
    fn test_missing_measure_column_is_a_contract_error() -> Result<()> {
        let ds = Dataset::from_rows(["date_key"], vec![vec![Value::Int(1)]])?;
        let err = QualityValidator::default()
            .validate(&ds, &["date_key"])
            .unwrap_err();
        assert_eq!(err, DomainError::MissingColumn("avg_latency_ms".into()));
        Ok(())
    }

    #[test]
    fn test_empty_grain_is_a_contract_error() -> Result<()> {
        let ds = Dataset::from_rows(COLUMNS, vec![])?;
        let err = QualityValidator::default()
            .validate::<&str>(&ds, &[])
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyGrain);
        Ok(())
    }
}
