// netpulse-core/src/domain/quality/mod.rs

pub mod report;
pub mod rules;
pub mod validator;

pub use report::{Stage, ValidationReport};
pub use rules::{QualityRule, Severity, Violation};
pub use validator::QualityValidator;
