// netpulse-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const CONFIG_FILE: &str = "netpulse.yaml";
const CONFIG_CANDIDATES: [&str; 2] = [CONFIG_FILE, "netpulse_project.yaml"];

pub const ENV_DATA_PATH: &str = "NETPULSE_DATA_PATH";
pub const ENV_LATENCY_MAX_MS: &str = "NETPULSE_LATENCY_MAX_MS";
pub const ENV_PACKET_LOSS_MAX_PCT: &str = "NETPULSE_PACKET_LOSS_MAX_PCT";

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    load_project_config_with(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_project_config`] with an explicit environment lookup, so
/// overrides can be exercised without touching the process environment.
pub fn load_project_config_with<F>(
    project_dir: &Path,
    env: F,
) -> Result<ProjectConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Discover the main file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Parse YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Environment layering (NETPULSE_LATENCY_MAX_MS=150 netpulse run)
    apply_env_overrides(&mut config, env)?;

    // 4. Fail before any data is touched
    config.validate()?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "No configuration file found in {:?}. Checked: {:?}",
                root, CONFIG_CANDIDATES
            ))
        })
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, env: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_DATA_PATH) {
        info!(old = ?config.data_path, new = ?val, "Overriding data path via ENV");
        config.data_path = val;
    }
    if let Some(val) = env(ENV_LATENCY_MAX_MS) {
        config.quality.latency_max_ms = parse_threshold(ENV_LATENCY_MAX_MS, &val)?;
        info!(value = config.quality.latency_max_ms, "Overriding latency max via ENV");
    }
    if let Some(val) = env(ENV_PACKET_LOSS_MAX_PCT) {
        config.quality.packet_loss_max_pct = parse_threshold(ENV_PACKET_LOSS_MAX_PCT, &val)?;
        info!(value = config.quality.packet_loss_max_pct, "Overriding packet loss max via ENV");
    }
    Ok(())
}

fn parse_threshold(key: &str, raw: &str) -> Result<f64, InfrastructureError> {
    raw.trim().parse::<f64>().map_err(|e| {
        InfrastructureError::ConfigError(format!("{key}='{raw}' is not a number: {e}"))
    })
}

/// Writes a default `netpulse.yaml` unless one already exists. Returns the
/// path of the config in use.
pub fn write_default_config(project_dir: &Path, name: &str) -> Result<PathBuf, InfrastructureError> {
    if let Ok(existing) = find_main_config(project_dir) {
        return Ok(existing);
    }
    let path = project_dir.join(CONFIG_FILE);
    let content = serde_yaml::to_string(&ProjectConfig::new(name))?;
    atomic_write(&path, content)?;
    info!(path = ?path, "Default project configuration written");
    Ok(path)
}
