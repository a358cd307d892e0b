use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Catalog;
use crate::validate::{validate, EntryDraft};

pub fn run(catalog: &mut Catalog, draft: &EntryDraft) -> Result<CmdResult> {
    let entry = validate(draft)?;
    let key = entry.key();
    catalog.insert(entry.clone())?;
    tracing::info!(%key, "entry added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {}: {} ({})",
        entry.kind(),
        entry.title,
        entry.year
    )));
    result.affected.push(entry);
    Ok(result)
}
