use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::csv::CsvStore;
use crate::store::Catalog;
use std::path::Path;

/// Reads entries from a CSV file at `path` into the catalog.
///
/// Merges by default: rows whose identity key is already present are skipped
/// and counted. With `replace` the imported file becomes the whole catalog.
/// Malformed rows follow the usual load policy (skip and log).
pub fn run(catalog: &mut Catalog, path: &Path, replace: bool) -> Result<CmdResult> {
    let report = CsvStore::new(path).load()?;
    let mut result = CmdResult::default();

    if report.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} unreadable rows",
            report.skipped
        )));
    }

    if replace {
        let count = report.catalog.len();
        *catalog = report.catalog;
        tracing::info!(path = %path.display(), entries = count, "catalog replaced by import");
        result.add_message(CmdMessage::success(format!(
            "Imported {} entries from {} (replaced catalog)",
            count,
            path.display()
        )));
        return Ok(result);
    }

    let mut imported = 0usize;
    let mut duplicates = 0usize;
    for entry in report.catalog.iter() {
        match catalog.insert(entry.clone()) {
            Ok(()) => imported += 1,
            Err(_) => duplicates += 1,
        }
    }
    tracing::info!(path = %path.display(), imported, duplicates, "entries imported");

    if duplicates > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} entries already in the catalog",
            duplicates
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} entries from {}",
        imported,
        path.display()
    )));
    Ok(result)
}
