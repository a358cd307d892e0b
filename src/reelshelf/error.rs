use crate::model::EntryKey;
use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryKey),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(EntryKey),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backup error: {0}")]
    Backup(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
