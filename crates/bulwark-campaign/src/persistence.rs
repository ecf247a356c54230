//! Storage for `PermanentProgress`.
//!
//! Stores report failures as `Err(String)`; `load_or_default` and
//! `save_logged` turn those into log lines so gameplay never stops on them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::warn;

use crate::progression::PermanentProgress;

/// Key-value style store for the single progress record.
pub trait ProgressStore: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PermanentProgress>, String>;
    fn save(&mut self, progress: &PermanentProgress) -> Result<(), String>;
}

/// Load from `store`, falling back to fresh progress on any failure.
/// Levels read from storage are clamped to their maximum.
pub fn load_or_default(store: &dyn ProgressStore) -> PermanentProgress {
    match store.load() {
        Ok(Some(progress)) => progress.sanitized(),
        Ok(None) => PermanentProgress::default(),
        Err(e) => {
            warn!("{e}; starting with fresh progress");
            PermanentProgress::default()
        }
    }
}

/// Save, logging instead of propagating a failure.
pub fn save_logged(store: &mut dyn ProgressStore, progress: &PermanentProgress) {
    if let Err(e) = store.save(progress) {
        warn!("{e}; progress not saved");
    }
}

/// Progress kept as pretty-printed JSON in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<PermanentProgress>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read progress file: {e}"))?;
        let progress: PermanentProgress = serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse progress data: {e}"))?;
        Ok(Some(progress))
    }

    fn save(&mut self, progress: &PermanentProgress) -> Result<(), String> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create progress directory: {e}"))?;
        }
        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| format!("Failed to serialize progress: {e}"))?;
        fs::write(&self.path, json).map_err(|e| format!("Failed to write progress file: {e}"))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    stored: Option<PermanentProgress>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory store. Clones share the same record, so a test can keep a
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: PermanentProgress) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.stored = Some(progress);
        }
        store
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.lock().map(|i| i.saves).unwrap_or(0)
    }

    pub fn stored(&self) -> Option<PermanentProgress> {
        self.inner.lock().ok().and_then(|i| i.stored.clone())
    }

    /// Make every later save fail.
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_saves = fail;
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<PermanentProgress>, String> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| format!("Failed to lock progress store: {e}"))?;
        Ok(inner.stored.clone())
    }

    fn save(&mut self, progress: &PermanentProgress) -> Result<(), String> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| format!("Failed to lock progress store: {e}"))?;
        if inner.fail_saves {
            return Err("Failed to write progress: store unavailable".into());
        }
        inner.stored = Some(progress.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulwark_core::enums::PermanentUpgradeKind;

    fn sample_progress() -> PermanentProgress {
        let mut p = PermanentProgress {
            total_kills: 120,
            total_waves: 14,
            total_games: 3,
            experience_points: 410,
            ..Default::default()
        };
        p.upgrades.set_level(PermanentUpgradeKind::BulletSpeed, 2);
        p
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("bulwark_test_save_load");
        let _ = fs::remove_dir_all(&dir);

        let mut store = JsonFileStore::new(dir.join("progress.json"));
        store.save(&sample_progress()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample_progress());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = std::env::temp_dir().join("bulwark_test_missing");
        let _ = fs::remove_dir_all(&dir);
        let store = JsonFileStore::new(dir.join("progress.json"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(load_or_default(&store), PermanentProgress::default());
    }

    #[test]
    fn malformed_file_falls_back_to_default() {
        let dir = std::env::temp_dir().join("bulwark_test_malformed");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("progress.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(load_or_default(&store), PermanentProgress::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_range_levels_clamped_on_load() {
        let mut p = sample_progress();
        p.upgrades.starting_health = 50;
        let store = MemoryStore::with_progress(p);
        let loaded = load_or_default(&store);
        assert_eq!(loaded.upgrades.starting_health, 8);
        assert_eq!(loaded.experience_points, 410);
    }

    #[test]
    fn memory_store_shares_state() {
        let handle = MemoryStore::new();
        let mut owned = handle.clone();
        owned.save(&sample_progress()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.stored(), Some(sample_progress()));
    }

    #[test]
    fn failed_save_is_logged_not_fatal() {
        let handle = MemoryStore::new();
        handle.set_fail_saves(true);
        let mut owned = handle.clone();
        save_logged(&mut owned, &sample_progress());
        assert_eq!(handle.save_count(), 0);
        assert!(handle.stored().is_none());
    }
}
