use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::Catalog;

pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    let stats = catalog.aggregate();
    let mut result = CmdResult::default();
    if stats.total_items() == 0 {
        result.add_message(CmdMessage::info("Catalog is empty."));
    }
    Ok(result.with_stats(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::validate::EntryDraft;

    #[test]
    fn wraps_aggregate_snapshot() {
        let mut catalog = Catalog::new();
        add::run(&mut catalog, &EntryDraft::movie("Heat", 1995)).unwrap();
        add::run(&mut catalog, &EntryDraft::series("Dark", "2017-20")).unwrap();

        let result = run(&catalog).unwrap();
        let stats = result.stats.unwrap();
        assert_eq!(stats.total_movies, 1);
        assert_eq!(stats.total_series, 1);
        assert!(result.messages.is_empty());
    }
}
