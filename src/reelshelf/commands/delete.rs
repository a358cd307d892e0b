use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntryKey;
use crate::store::Catalog;

pub fn run(catalog: &mut Catalog, key: &EntryKey) -> Result<CmdResult> {
    let removed = catalog.remove(key)?;
    tracing::info!(%key, "entry removed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {}: {} ({})",
        removed.kind(),
        removed.title,
        removed.year
    )));
    result.affected.push(removed);
    Ok(result)
}
