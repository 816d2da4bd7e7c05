// netpulse-core/src/domain/quality/rules.rs

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Blocks publish.
    Critical,
    /// Recorded only.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => f.write_str("CRITICAL"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// The fixed rule set, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityRule {
    NoNullGrainKeys,
    NoDuplicateGrain,
    LatencyRange,
    PacketLossRange,
}

impl QualityRule {
    pub const ALL: [QualityRule; 4] = [
        QualityRule::NoNullGrainKeys,
        QualityRule::NoDuplicateGrain,
        QualityRule::LatencyRange,
        QualityRule::PacketLossRange,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            QualityRule::NoNullGrainKeys => "no_null_grain_keys",
            QualityRule::NoDuplicateGrain => "no_duplicate_grain",
            QualityRule::LatencyRange => "latency_range",
            QualityRule::PacketLossRange => "packet_loss_range",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            QualityRule::NoNullGrainKeys | QualityRule::NoDuplicateGrain => Severity::Critical,
            QualityRule::LatencyRange | QualityRule::PacketLossRange => Severity::Warning,
        }
    }

    pub fn violation(&self, message: impl Into<String>) -> Violation {
        Violation {
            rule_id: self.id().to_string(),
            severity: self.severity(),
            message: message.into(),
        }
    }
}

/// One failed rule. Emitted once per rule, never once per offending row.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Violation {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
}
