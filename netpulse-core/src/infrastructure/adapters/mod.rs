// netpulse-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod report;

pub use self::duckdb::{CsvCuratedPublisher, CsvKpiSource, DuckDbCsv};
pub use self::report::{JsonReportSink, load_latest_report};
