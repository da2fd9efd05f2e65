//! One-way export of the current snapshot.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::models::Game;

/// Suggested filename for exported snapshots.
pub const EXPORT_FILE_NAME: &str = "playledger_data.json";

/// Write the snapshot as [`EXPORT_FILE_NAME`] under the given directory,
/// as indented, human-readable JSON, and return the path written. The
/// directory is created if it does not exist yet. There is no corresponding
/// import path; the persisted store is the canonical copy.
pub fn export_snapshot(dir: impl Into<PathBuf>, games: &[Game]) -> Result<PathBuf> {
    let dir: PathBuf = dir.into();
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    let serialised = serde_json::to_vec_pretty(games).context("failed to serialise games")?;
    fs::write(&path, serialised)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directory_target_gets_the_suggested_filename() -> Result<()> {
        let dir = tempdir()?;
        let games = vec![Game::with_id("g1", "Tetris", None)];
        let path = export_snapshot(dir.path(), &games)?;
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(EXPORT_FILE_NAME)
        );

        let content = fs::read_to_string(&path)?;
        // Indented output, original field names.
        assert!(content.contains('\n'));
        assert!(content.contains("\"scoreCached\""));
        Ok(())
    }

    #[test]
    fn missing_export_directory_is_created() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("exports");
        let path = export_snapshot(&target, &[])?;
        assert_eq!(path, target.join(EXPORT_FILE_NAME));
        assert_eq!(fs::read_to_string(&path)?.trim(), "[]");
        Ok(())
    }
}
