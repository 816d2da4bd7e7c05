// netpulse-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

pub const DEFAULT_LATENCY_MAX_MS: f64 = 200.0;
pub const DEFAULT_PACKET_LOSS_MAX_PCT: f64 = 5.0;

/// Upper bounds used by the range rules.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
pub struct QualityThresholds {
    #[validate(range(min = 0.0, message = "latency_max_ms must be non-negative"))]
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: f64,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "packet_loss_max_pct must lie in [0, 100]"
    ))]
    #[serde(default = "default_packet_loss_max_pct")]
    pub packet_loss_max_pct: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            latency_max_ms: DEFAULT_LATENCY_MAX_MS,
            packet_loss_max_pct: DEFAULT_PACKET_LOSS_MAX_PCT,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "project name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "data-path", default = "default_data_path")]
    pub data_path: String,

    #[serde(rename = "raw-kpi-file", default = "default_raw_kpi_file")]
    pub raw_kpi_file: String,

    #[serde(rename = "raw-incident-file", default = "default_raw_incident_file")]
    pub raw_incident_file: String,

    #[serde(rename = "reference-path", default = "default_reference_path")]
    pub reference_path: String,

    #[serde(rename = "curated-kpi-file", default = "default_curated_kpi_file")]
    pub curated_kpi_file: String,

    #[serde(rename = "quality-path", default = "default_quality_path")]
    pub quality_path: String,

    /// Explicit targets for `netpulse clean`. When absent, the curated and
    /// quality directories under `data-path` are cleaned.
    #[serde(rename = "clean-targets", default, skip_serializing_if = "Option::is_none")]
    pub clean_targets: Option<Vec<String>>,

    #[validate(nested)]
    #[serde(default)]
    pub quality: QualityThresholds,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            data_path: default_data_path(),
            raw_kpi_file: default_raw_kpi_file(),
            raw_incident_file: default_raw_incident_file(),
            reference_path: default_reference_path(),
            curated_kpi_file: default_curated_kpi_file(),
            quality_path: default_quality_path(),
            clean_targets: None,
            quality: QualityThresholds::default(),
        }
    }

    pub fn data_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_path)
    }

    pub fn raw_kpi_path(&self, project_dir: &Path) -> PathBuf {
        self.data_dir(project_dir).join(&self.raw_kpi_file)
    }

    pub fn raw_incident_path(&self, project_dir: &Path) -> PathBuf {
        self.data_dir(project_dir).join(&self.raw_incident_file)
    }

    pub fn reference_dir(&self, project_dir: &Path) -> PathBuf {
        self.data_dir(project_dir).join(&self.reference_path)
    }

    pub fn curated_kpi_path(&self, project_dir: &Path) -> PathBuf {
        self.data_dir(project_dir).join(&self.curated_kpi_file)
    }

    pub fn quality_dir(&self, project_dir: &Path) -> PathBuf {
        self.data_dir(project_dir).join(&self.quality_path)
    }

    /// Output directories written by a run, relative to the project
    /// directory unless `data-path` is absolute.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        let data = Path::new(&self.data_path);
        let curated = data.join(&self.curated_kpi_file);
        let curated_dir = curated.parent().map_or_else(|| data.to_path_buf(), Path::to_path_buf);
        vec![curated_dir, data.join(&self.quality_path)]
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_data_path() -> String {
    "data".to_string()
}
fn default_raw_kpi_file() -> String {
    "raw/fact_network_kpi.csv".to_string()
}
fn default_raw_incident_file() -> String {
    "raw/fact_incident.csv".to_string()
}
fn default_reference_path() -> String {
    "reference".to_string()
}
fn default_curated_kpi_file() -> String {
    "curated/network_kpi_curated.csv".to_string()
}
fn default_quality_path() -> String {
    "quality".to_string()
}
fn default_latency_max_ms() -> f64 {
    DEFAULT_LATENCY_MAX_MS
}
fn default_packet_loss_max_pct() -> f64 {
    DEFAULT_PACKET_LOSS_MAX_PCT
}
