// netpulse-core/src/ports/mod.rs

pub mod pipeline;

pub use pipeline::{CuratedPublisher, KpiSource, ReportSink};
