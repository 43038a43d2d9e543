use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use super::types::CacheEntry;
use crate::constants::CACHE_FILE_NAME;

/// The single well-known file that backs the prediction cache.
///
/// The whole cache is one serialized list; every save rewrites it in full.
/// There is no locking across processes, so the last writer wins. A missing
/// or corrupt file loads as an empty cache rather than an error.
#[derive(Debug, Clone)]
pub struct CacheSlot {
    path: PathBuf,
}

impl CacheSlot {
    /// Slot at the default location in the user data directory
    pub fn default_location() -> Result<Self> {
        let data_dir = if let Some(proj_dirs) = ProjectDirs::from("", "", "counselor") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            // Fallback to ~/.local/share/counselor
            let home = std::env::var("HOME")?;
            PathBuf::from(home).join(".local").join("share").join("counselor")
        };
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(CACHE_FILE_NAME),
        })
    }

    /// Slot at an explicit path (used by tests)
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the full entry list from disk
    pub fn load(&self) -> Vec<CacheEntry> {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_default()
    }

    /// Rewrite the full entry list to disk
    pub fn save(&self, entries: &[CacheEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the backing file entirely
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{PredictionInput, PredictionResult};
    use chrono::Local;

    fn entry(rank: u32) -> CacheEntry {
        CacheEntry {
            input: PredictionInput {
                exam_type: "PGCET".to_string(),
                state: "Karnataka".to_string(),
                place: "All".to_string(),
                rank,
                category: "GM".to_string(),
                college_type: "MCA".to_string(),
            },
            results: PredictionResult::default(),
            cached_at: Local::now(),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = CacheSlot::at_path(dir.path().join("cache.json"));

        slot.save(&[entry(100), entry(200)]).unwrap();
        let loaded = slot.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].input.rank, 100);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slot = CacheSlot::at_path(dir.path().join("nope.json"));
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{ not json").unwrap();
        let slot = CacheSlot::at_path(path);
        assert!(slot.load().is_empty());
    }
}
