// netpulse-core/src/domain/quality/report.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{Severity, Violation};

/// Which side of the aggregation a report describes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Raw,
    Curated,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Raw => "raw",
            Stage::Curated => "curated",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one validation call. Field order is the external JSON layout.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ValidationReport {
    pub passed: bool,
    pub total_rules: usize,
    pub failed_rules: usize,
    pub critical_failures: usize,
    pub warning_failures: usize,
    pub coverage_pct: f64,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Derives every counter from the violation list so `passed` can never
    /// disagree with `critical_failures`.
    pub fn from_violations(total_rules: usize, violations: Vec<Violation>) -> Self {
        let failed_rules = violations.len();
        let critical_failures = violations
            .iter()
            .filter(|v| v.severity == Severity::Critical)
            .count();

        let coverage_pct = if total_rules == 0 {
            100.0
        } else {
            let raw = (total_rules - failed_rules) as f64 / total_rules as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };

        Self {
            passed: critical_failures == 0,
            total_rules,
            failed_rules,
            critical_failures,
            warning_failures: failed_rules - critical_failures,
            coverage_pct,
            violations,
        }
    }

    pub fn has_violation(&self, rule_id: &str) -> bool {
        self.violations.iter().any(|v| v.rule_id == rule_id)
    }
}
