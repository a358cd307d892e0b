//! # API Facade
//!
//! The single entry point for all catalog operations, regardless of the front
//! end. Owns the in-memory [`Catalog`], the [`CsvStore`], the
//! [`BackupManager`], and the [`SaveGuard`] for the process lifetime; commands
//! contain the business logic and the facade dispatches to them.
//!
//! The save path is the one place the pieces meet: claim the guard, back up
//! the on-disk file, then rewrite it. A backup failure aborts the save; a
//! claimed guard means another save is running and this one is refused rather
//! than queued. Autosave ticks go through the same path via
//! [`spawn_autosave`].

use crate::autosave::{Autosave, SaveGuard};
use crate::backup::BackupManager;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::commands::list::SortBy;
use crate::commands::update::EntryPatch;
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::model::EntryKey;
use crate::store::csv::CsvStore;
use crate::store::{Catalog, EntryFilter};
use crate::validate::EntryDraft;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, warn};

pub struct ShelfApi {
    catalog: Catalog,
    store: CsvStore,
    backups: BackupManager,
    guard: SaveGuard,
}

impl ShelfApi {
    /// Loads the catalog from the configured data file under `base_dir`.
    ///
    /// A data file that does not exist yet is a fresh start, not an error;
    /// any other read failure surfaces to the caller.
    pub fn open(base_dir: &Path, config: &ShelfConfig) -> Result<Self> {
        let data_file = config.data_file_path(base_dir);
        let store = CsvStore::new(&data_file);
        let catalog = match store.load() {
            Ok(report) => report.catalog,
            Err(e) if is_not_found(&e) => {
                warn!(path = %data_file.display(), "no data file yet, starting empty");
                Catalog::new()
            }
            Err(e) => return Err(e),
        };
        let backups = BackupManager::new(&data_file, config.backup_dir_path(base_dir));
        Ok(Self {
            catalog,
            store,
            backups,
            guard: SaveGuard::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn save_guard(&self) -> SaveGuard {
        self.guard.clone()
    }

    pub fn add(&mut self, draft: &EntryDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.catalog, draft)
    }

    pub fn update(&mut self, key: &EntryKey, patch: &EntryPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.catalog, key, patch)
    }

    pub fn delete(&mut self, key: &EntryKey) -> Result<CmdResult> {
        commands::delete::run(&mut self.catalog, key)
    }

    pub fn list(&self, filter: &EntryFilter, sort: SortBy) -> Result<CmdResult> {
        commands::list::run(&self.catalog, filter, sort)
    }

    pub fn search(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.catalog, term)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.catalog)
    }

    pub fn export(&self, path: &Path) -> Result<CmdResult> {
        commands::export::run(&self.catalog, path)
    }

    pub fn import(&mut self, path: &Path, replace: bool) -> Result<CmdResult> {
        commands::import::run(&mut self.catalog, path, replace)
    }

    /// Explicit save: backup first, then rewrite the data file.
    ///
    /// Refused (not queued) when another save holds the guard.
    pub fn save(&self) -> Result<CmdResult> {
        let _running = self
            .guard
            .try_begin()
            .ok_or_else(|| ShelfError::Api("a save is already in progress".to_string()))?;
        self.save_with_guard_held()
    }

    fn save_with_guard_held(&self) -> Result<CmdResult> {
        let backup = self.backups.create().map_err(|e| {
            error!(error = %e, "backup failed, save aborted");
            e
        })?;
        self.store.save(&self.catalog)?;

        let mut result = CmdResult::default();
        match backup {
            Some(path) => result.add_message(CmdMessage::success(format!(
                "Saved {} entries (backup: {})",
                self.catalog.len(),
                path.display()
            ))),
            None => result.add_message(CmdMessage::success(format!(
                "Saved {} entries",
                self.catalog.len()
            ))),
        }
        Ok(result)
    }

    /// Lists backups, optionally pruning to the newest `keep` first.
    pub fn backups(&self, prune_keep: Option<usize>) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        if let Some(keep) = prune_keep {
            let removed = self.backups.prune(keep)?;
            result.add_message(CmdMessage::info(format!(
                "Pruned {} backup{}",
                removed,
                if removed == 1 { "" } else { "s" }
            )));
        }
        let listed = self.backups.list()?;
        if listed.is_empty() {
            result.add_message(CmdMessage::info("No backups."));
        }
        Ok(result.with_backups(listed))
    }
}

fn is_not_found(err: &ShelfError) -> bool {
    match err {
        ShelfError::Io(e) => e.kind() == ErrorKind::NotFound,
        ShelfError::Csv(e) => {
            matches!(e.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound)
        }
        _ => false,
    }
}

/// Wires the autosave scheduler to a shared facade. Each tick takes the same
/// guard as a manual save, so the two can never overlap; a tick that finds the
/// guard busy is dropped.
pub fn spawn_autosave(shelf: Arc<Mutex<ShelfApi>>, interval: Duration) -> Autosave {
    let guard = match shelf.lock() {
        Ok(s) => s.guard.clone(),
        Err(poisoned) => poisoned.into_inner().guard.clone(),
    };
    Autosave::start(interval, guard, move || match shelf.lock() {
        Ok(shelf) => {
            if let Err(e) = shelf.save_with_guard_held() {
                error!(error = %e, "autosave failed");
            }
        }
        Err(_) => error!("autosave skipped: catalog lock poisoned"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> ShelfApi {
        ShelfApi::open(dir.path(), &ShelfConfig::default()).unwrap()
    }

    #[test]
    fn open_without_data_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let api = open(&dir);
        assert!(api.catalog().is_empty());
    }

    #[test]
    fn first_save_has_no_backup_later_saves_do() {
        let dir = TempDir::new().unwrap();
        let mut api = open(&dir);
        api.add(&EntryDraft::movie("Heat", 1995)).unwrap();
        api.save().unwrap();
        assert!(api.backups(None).unwrap().backups.is_empty());

        api.add(&EntryDraft::movie("Alien", 1979)).unwrap();
        api.save().unwrap();
        let backups = api.backups(None).unwrap().backups;
        assert_eq!(backups.len(), 1);

        // The backup holds the pre-save content: one entry, not two.
        let backed_up = fs::read_to_string(&backups[0]).unwrap();
        assert!(backed_up.contains("Heat"));
        assert!(!backed_up.contains("Alien"));
    }

    #[test]
    fn save_refused_while_guard_held() {
        let dir = TempDir::new().unwrap();
        let mut api = open(&dir);
        api.add(&EntryDraft::movie("Heat", 1995)).unwrap();

        let _running = api.save_guard().try_begin().unwrap();
        let err = api.save().unwrap_err();
        assert!(matches!(err, ShelfError::Api(_)));
    }

    #[test]
    fn reopen_round_trips_catalog() {
        let dir = TempDir::new().unwrap();
        let mut api = open(&dir);
        api.add(&EntryDraft::movie("Heat", 1995)).unwrap();
        api.add(&EntryDraft::series("Dark", "2017-20")).unwrap();
        api.save().unwrap();

        let reopened = open(&dir);
        let a: Vec<_> = api.catalog().iter().collect();
        let b: Vec<_> = reopened.catalog().iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn autosave_persists_without_manual_save() {
        let dir = TempDir::new().unwrap();
        let shelf = Arc::new(Mutex::new(open(&dir)));
        shelf
            .lock()
            .unwrap()
            .add(&EntryDraft::movie("Heat", 1995))
            .unwrap();

        let autosave = spawn_autosave(shelf.clone(), Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(80));
        autosave.stop();

        assert!(dir.path().join("watched.csv").exists());
    }
}
