use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::csv::CsvStore;
use crate::store::Catalog;
use std::path::Path;

/// Writes the whole catalog to a CSV file at `path`, same schema as the data
/// file. The live data file is not touched.
pub fn run(catalog: &Catalog, path: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if catalog.is_empty() {
        result.add_message(CmdMessage::info("No entries to export."));
        return Ok(result);
    }

    CsvStore::new(path).save(catalog)?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "catalog exported");

    result.add_message(CmdMessage::success(format!(
        "Exported {} entries to {}",
        catalog.len(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::validate::EntryDraft;
    use tempfile::TempDir;

    #[test]
    fn exports_full_catalog_to_path() {
        let dir = TempDir::new().unwrap();
        let mut catalog = Catalog::new();
        add::run(&mut catalog, &EntryDraft::movie("Heat", 1995)).unwrap();
        add::run(&mut catalog, &EntryDraft::series("Dark", "2017-20")).unwrap();

        let path = dir.path().join("shelf.csv");
        run(&catalog, &path).unwrap();

        let reloaded = CsvStore::new(&path).load().unwrap().catalog;
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn empty_catalog_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelf.csv");
        let result = run(&Catalog::new(), &path).unwrap();
        assert!(!path.exists());
        assert_eq!(result.messages.len(), 1);
    }
}
