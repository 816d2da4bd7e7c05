pub mod project;

pub use crate::domain::project::{ProjectConfig, QualityThresholds};
pub use project::{CONFIG_FILE, load_project_config, write_default_config};
