//! Persistence of the game collection as a single JSON document.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::Game;

/// Storage key carried over from the original deployment. Used as the file
/// stem so the on-disk document matches the browser payload one-to-one.
pub const STORAGE_KEY: &str = "playledger_games_v1";

/// Reads and mirrors the full game collection at a fixed path.
///
/// Every snapshot change rewrites the whole document; there is no
/// incremental format.
#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    /// Store writing `playledger_games_v1.json` under the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Default data directory under the platform data dir.
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("playledger")
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection once at startup.
    ///
    /// A missing file is a fresh start. Unreadable or malformed content is
    /// logged and yields an empty collection; it is never surfaced as an
    /// error to the caller.
    pub fn load(&self) -> Vec<Game> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read {}: {err}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(games) => games,
            Err(err) => {
                warn!(
                    "Discarding malformed store {}: {err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Rewrite the whole collection, creating the directory if needed.
    pub fn persist(&self, games: &[Game]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialised = serde_json::to_vec(games).context("failed to serialise games")?;
        fs::write(&self.path, serialised)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use tempfile::tempdir;

    #[test]
    fn persist_and_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = GameStore::new(dir.path());

        let mut game = Game::with_id("g1", "Disco Elysium", None);
        game.status = Status::Playing;
        game.deadline = Some("25/12/24".to_string());
        game.mobile_revenue = Some(150.0);
        store.persist(&[game])?;

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "g1");
        assert_eq!(loaded[0].status, Status::Playing);
        assert_eq!(loaded[0].deadline.as_deref(), Some("25/12/24"));
        assert_eq!(loaded[0].mobile_revenue, Some(150.0));
        Ok(())
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = GameStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_content_falls_back_to_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = GameStore::new(dir.path());
        fs::write(store.path(), "{not json")?;
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn browser_payload_loads_unchanged() -> Result<()> {
        let dir = tempdir()?;
        let store = GameStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{
                "id": "x1",
                "name": "Genshin Impact",
                "image": null,
                "playing": true,
                "watching": false,
                "scoreCached": 31,
                "evaluations": [],
                "deadline": "01/09/24",
                "mobileRevenue": 2000
            }]"#,
        )?;
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].score_cached, 31);
        assert_eq!(loaded[0].mobile_revenue, Some(2000.0));
        assert!(loaded[0].status.is_playing());
        Ok(())
    }
}
