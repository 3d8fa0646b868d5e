//! JSON file-backed assignment store.
//!
//! # Design Decisions
//! - Snapshots are written to a staging file, flushed, synced and renamed
//!   over the target, so a failed write never damages the previous snapshot
//! - One write lock spans swap, save and rollback for every group

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::exchange::Assignment;
use crate::store::memory::{to_records, MemoryStore};
use crate::store::{AssignmentRecord, AssignmentStore, StoreResult};

/// A `MemoryStore` that rewrites its JSON snapshot after every replace.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    memory: MemoryStore,
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing records if the file exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let memory = MemoryStore::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let groups: HashMap<String, Vec<AssignmentRecord>> = serde_json::from_reader(reader)?;
            memory.restore(groups);
            tracing::info!(
                path = %path.display(),
                groups = memory.group_count(),
                "Loaded stored assignments"
            );
        }

        Ok(Self {
            memory,
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every group's records to disk.
    pub fn save(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_snapshot()
    }

    /// Sibling file the snapshot is staged in before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("assignments"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Caller must hold `write_lock`.
    fn write_snapshot(&self) -> StoreResult<()> {
        let staging = self.staging_path();
        let groups = self.memory.snapshot();

        let result = (|| -> StoreResult<()> {
            let mut writer = BufWriter::new(File::create(&staging)?);
            serde_json::to_writer_pretty(&mut writer, &groups)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&staging, &self.path)?;
            Ok(())
        })();

        if result.is_err() && staging.is_file() {
            fs::remove_file(&staging).unwrap_or_default();
        }
        result?;

        tracing::debug!(path = %self.path.display(), groups = groups.len(), "Saved assignments");
        Ok(())
    }
}

impl AssignmentStore for JsonFileStore {
    fn replace_group(&self, group: &str, assignment: &Assignment<String>) -> StoreResult<Uuid> {
        let run_id = Uuid::new_v4();
        let records = to_records(group, assignment, run_id)?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let previous = self.memory.swap(group, records);

        if let Err(e) = self.write_snapshot() {
            tracing::error!(group = %group, error = %e, "Failed to save assignments; rolling back");
            self.memory.rollback(group, previous);
            return Err(e);
        }
        Ok(run_id)
    }

    fn group_assignments(&self, group: &str) -> Vec<AssignmentRecord> {
        self.memory.group_assignments(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, Uuid::new_v4()))
    }

    #[test]
    fn test_persistence() {
        let path = temp_path("gift-exchange-store");
        let assignment = Assignment::from(vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ]);

        let store = JsonFileStore::open(&path).unwrap();
        let run_id = store.replace_group("family", &assignment).unwrap();

        // Load new instance
        let loaded = JsonFileStore::open(&path).unwrap();
        let records = loaded.group_assignments("family");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].run_id, run_id);
        assert_eq!(loaded.receiver_for("family", "b"), Some("a".to_string()));

        // Cleanup
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = temp_path("gift-exchange-missing");
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.group_assignments("any").is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = std::env::temp_dir().join(format!("gift-exchange-dir-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        // Pointing the store at a directory makes every save fail.
        let store = JsonFileStore::open(&dir).unwrap_or_else(|_| JsonFileStore {
            memory: MemoryStore::new(),
            path: dir.clone(),
            write_lock: Arc::new(Mutex::new(())),
        });

        let assignment = Assignment::from(vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ]);
        assert!(store.replace_group("g", &assignment).is_err());
        assert!(store.group_assignments("g").is_empty());

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }

    fn pairs(pairs: &[(&str, &str)]) -> Assignment<String> {
        Assignment::from(
            pairs
                .iter()
                .map(|(g, r)| (g.to_string(), r.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let path = temp_path("gift-exchange-snapshot");
        let store = JsonFileStore::open(&path).unwrap();
        let first = store.replace_group("fam", &pairs(&[("a", "b"), ("b", "a")])).unwrap();

        // A directory squatting on the staging path makes the next write fail.
        let staging = store.staging_path();
        std::fs::create_dir_all(&staging).unwrap();

        let err = store.replace_group("fam", &pairs(&[("a", "c"), ("c", "b"), ("b", "a")]));
        assert!(err.is_err());
        assert!(store.group_assignments("fam").iter().all(|r| r.run_id == first));

        let reopened = JsonFileStore::open(&path).unwrap();
        let records = reopened.group_assignments("fam");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.run_id == first));

        std::fs::remove_dir_all(&staging).unwrap_or_default();
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_staging_file_removed_after_save() {
        let path = temp_path("gift-exchange-staging");
        let store = JsonFileStore::open(&path).unwrap();
        store.replace_group("g", &pairs(&[("a", "b"), ("b", "a")])).unwrap();

        assert!(path.is_file());
        assert!(!store.staging_path().exists());
        assert_eq!(store.path(), path.as_path());

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_replaces_match_disk() {
        let path = temp_path("gift-exchange-concurrent");
        let store = JsonFileStore::open(&path).unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let group = format!("group-{}", i % 4);
                let giver = format!("p{}", i);
                store
                    .replace_group(&group, &pairs(&[(giver.as_str(), "x"), ("x", giver.as_str())]))
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        for i in 0..4 {
            let group = format!("group-{}", i);
            let in_memory = store.group_assignments(&group);
            assert_eq!(in_memory.len(), 2);
            assert_eq!(reopened.group_assignments(&group), in_memory);
        }

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
