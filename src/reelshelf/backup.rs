//! Timestamped backups of the data file.
//!
//! A backup is taken before every save; if it fails, the save is aborted.
//! Backups accumulate unbounded by default; [`BackupManager::prune`] is the
//! explicit retention operation.

use crate::error::{Result, ShelfError};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(data_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the current data file into the backup directory, tagged with a
    /// timestamp. Returns `None` when there is no data file yet (first save).
    /// Existing backups are never overwritten: a same-second collision gets a
    /// numeric suffix.
    pub fn create(&self) -> Result<Option<PathBuf>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        fs::create_dir_all(&self.backup_dir)?;

        let stem = self
            .data_file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ShelfError::Backup(format!(
                    "data file has no usable name: {}",
                    self.data_file.display()
                ))
            })?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let mut path = self
            .backup_dir
            .join(format!("{}_backup_{}.csv", stem, timestamp));
        let mut counter = 1;
        while path.exists() {
            path = self
                .backup_dir
                .join(format!("{}_backup_{}-{}.csv", stem, timestamp, counter));
            counter += 1;
        }

        fs::copy(&self.data_file, &path)?;
        info!(backup = %path.display(), "backup created");
        Ok(Some(path))
    }

    /// Backup files, oldest first. The timestamp in the name sorts
    /// lexicographically, so name order is age order.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups: Vec<PathBuf> = fs::read_dir(&self.backup_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension().is_some_and(|ext| ext == "csv")
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.contains("_backup_"))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    /// Deletes all but the newest `keep` backups. Returns how many were
    /// removed.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let backups = self.list()?;
        let excess = backups.len().saturating_sub(keep);
        for path in &backups[..excess] {
            fs::remove_file(path)?;
            info!(backup = %path.display(), "backup pruned");
        }
        Ok(excess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> BackupManager {
        BackupManager::new(dir.path().join("watched.csv"), dir.path().join("backups"))
    }

    #[test]
    fn no_data_file_means_nothing_to_back_up() {
        let dir = TempDir::new().unwrap();
        assert_eq!(manager(&dir).create().unwrap(), None);
    }

    #[test]
    fn backup_copies_pre_save_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("watched.csv"), "before").unwrap();

        let backup = manager(&dir).create().unwrap().unwrap();
        fs::write(dir.path().join("watched.csv"), "after").unwrap();

        assert_eq!(fs::read_to_string(&backup).unwrap(), "before");
        let name = backup.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("watched_backup_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn same_second_backups_do_not_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("watched.csv"), "a").unwrap();

        let mgr = manager(&dir);
        let first = mgr.create().unwrap().unwrap();
        let second = mgr.create().unwrap().unwrap();
        assert_ne!(first, second);
        assert_eq!(mgr.list().unwrap().len(), 2);
    }

    #[test]
    fn prune_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        fs::create_dir_all(mgr.backup_dir()).unwrap();
        for i in 0..4 {
            let name = format!("watched_backup_2024010{}_000000.csv", i + 1);
            fs::write(mgr.backup_dir().join(name), "x").unwrap();
        }

        let removed = mgr.prune(2).unwrap();
        assert_eq!(removed, 2);
        let left = mgr.list().unwrap();
        assert_eq!(left.len(), 2);
        let newest = left[1].file_name().unwrap().to_str().unwrap();
        assert!(newest.contains("20240104"));
    }
}
