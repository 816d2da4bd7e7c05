// netpulse-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` so that readers see either the old file or the
/// complete new one, never a partial write.
///
/// The bytes go to a temporary file created next to the target (same
/// filesystem, so the final rename is atomic), which is then persisted over
/// `path`. Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = ensure_parent_dir(path)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Creates the parent directory of `path` if needed and returns it.
pub fn ensure_parent_dir(path: &Path) -> Result<&Path, InfrastructureError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    Ok(parent)
}

/// Serializes `data` as pretty JSON and writes it atomically.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let content = serde_json::to_string_pretty(data)?;
    atomic_write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_missing_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("quality").join("dq_raw_2024_01.json");

        atomic_write(&file_path, "{}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{}");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_previous_version() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("curated.csv");

        atomic_write(&file_path, "a\n1\n")?;
        atomic_write(&file_path, "a\n2\n")?;

        assert_eq!(fs::read_to_string(&file_path)?, "a\n2\n");
        // No temporary leftovers next to the target.
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_save_json_is_pretty() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("out.json");
        save_json(&file_path, &serde_json::json!({ "passed": true }))?;
        assert_eq!(fs::read_to_string(file_path)?, "{\n  \"passed\": true\n}");
        Ok(())
    }
}
