// netpulse-core/src/application/mod.rs

pub mod clean;
pub mod pipeline;
pub mod sample;

// --- RE-EXPORTS (FACADE) ---
// `use netpulse_core::application::{run_pipeline, clean_project};`

pub use clean::clean_project;
pub use pipeline::{Pipeline, PipelineOutcome, RunSummary, run_pipeline};
pub use sample::{SampleOptions, SampleSummary, generate_sample_data};
