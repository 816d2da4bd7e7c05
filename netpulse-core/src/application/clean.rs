// netpulse-core/src/application/clean.rs

use crate::error::NetpulseError;
use crate::infrastructure::config::load_project_config;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Removes the configured `clean-targets`, or by default the curated and
/// quality directories under `data-path`. Raw inputs are never touched
/// unless listed explicitly.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, NetpulseError> {
    tracing::info!("🧹 Cleaning pipeline outputs...");

    let config = load_project_config(project_dir)?;

    let targets: Vec<PathBuf> = match &config.clean_targets {
        Some(explicit) => {
            for target_rel_path in explicit {
                let rel = Path::new(target_rel_path);

                // Path traversal guard
                let escapes = rel.is_absolute()
                    || rel
                        .components()
                        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
                if escapes {
                    return Err(NetpulseError::UnsafePath(target_rel_path.clone()));
                }
            }
            explicit.iter().map(PathBuf::from).collect()
        }
        // The pipeline's own output locations, wherever data-path points.
        None => config.output_dirs(),
    };

    let mut removed = Vec::new();
    for target in targets {
        let full_path = project_dir.join(&target);
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path)?;
        } else if full_path.exists() {
            fs::remove_file(&full_path)?;
        } else {
            continue;
        }
        let target = target.to_string_lossy().into_owned();
        tracing::info!(target = %target, "Artifact removed");
        removed.push(target);
    }

    Ok(removed)
}
