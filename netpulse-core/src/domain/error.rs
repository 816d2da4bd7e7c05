// netpulse-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Contract violations and arithmetic edge cases. Data-quality problems are
/// never reported through this type; they end up as report violations.
#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Required column '{0}' is missing from the dataset")]
    #[diagnostic(
        code(netpulse::domain::missing_column),
        help("Check the header row of the input file.")
    )]
    MissingColumn(String),

    #[error("Grain column list is empty")]
    #[diagnostic(code(netpulse::domain::empty_grain))]
    EmptyGrain,

    #[error("Column '{column}' holds a non-numeric value at row {row}")]
    #[diagnostic(
        code(netpulse::domain::non_numeric),
        help("KPI measures must be numeric or empty.")
    )]
    NonNumeric { column: String, row: usize },

    #[error("Row {row} has {found} values but the dataset has {expected} columns")]
    #[diagnostic(code(netpulse::domain::row_arity))]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Availability is undefined at row {row}: uptime and downtime are both zero")]
    #[diagnostic(
        code(netpulse::domain::zero_duration),
        help("A KPI row must cover a non-empty observation window.")
    )]
    ZeroDuration { row: usize },
}
