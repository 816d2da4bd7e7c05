pub mod configuration;

pub use configuration::{ProjectConfig, QualityThresholds};
