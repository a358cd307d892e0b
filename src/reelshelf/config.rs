use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "watched.csv";
const DEFAULT_BACKUP_DIR: &str = "backups";
const DEFAULT_LOG_FILE: &str = "reelshelf.log";
const DEFAULT_AUTOSAVE_MINUTES: u64 = 5;

/// Configuration, stored as `config.json` in the data directory.
///
/// File and directory values are resolved against the data directory unless
/// absolute, so a default config works without any paths in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// CSV file holding the catalog.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Directory for timestamped backups.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// Append-only log file.
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Minutes between autosave ticks.
    #[serde(default = "default_autosave_minutes")]
    pub autosave_minutes: u64,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_backup_dir() -> String {
    DEFAULT_BACKUP_DIR.to_string()
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_autosave_minutes() -> u64 {
    DEFAULT_AUTOSAVE_MINUTES
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_dir: default_backup_dir(),
            log_file: default_log_file(),
            autosave_minutes: default_autosave_minutes(),
        }
    }
}

impl ShelfConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ShelfConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    fn resolve(base: &Path, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    pub fn data_file_path(&self, base: &Path) -> PathBuf {
        Self::resolve(base, &self.data_file)
    }

    pub fn backup_dir_path(&self, base: &Path) -> PathBuf {
        Self::resolve(base, &self.backup_dir)
    }

    pub fn log_file_path(&self, base: &Path) -> PathBuf {
        Self::resolve(base, &self.log_file)
    }

    pub fn autosave_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.autosave_minutes * 60)
    }
}
