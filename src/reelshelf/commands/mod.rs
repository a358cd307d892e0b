//! Business logic for each operation, pure over the in-memory [`Catalog`].
//!
//! Command functions take the catalog (and plain arguments), return a
//! [`CmdResult`], and never touch stdout. Persistence of the data file is
//! orchestrated by the API facade; only [`export`] and [`import`] reach the
//! filesystem, and only at paths the user names.

use crate::model::Entry;
use crate::store::CatalogStats;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<Entry>,
    pub listed: Vec<Entry>,
    pub stats: Option<CatalogStats>,
    pub backups: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, entries: Vec<Entry>) -> Self {
        self.listed = entries;
        self
    }

    pub fn with_stats(mut self, stats: CatalogStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_backups(mut self, backups: Vec<PathBuf>) -> Self {
        self.backups = backups;
        self
    }
}
