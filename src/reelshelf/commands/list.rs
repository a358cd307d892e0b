use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Catalog, EntryFilter};

/// Presentation order for a listing. Sorting happens on the returned copy;
/// the stored insertion order is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Stored (insertion/load) order.
    #[default]
    Added,
    Title,
    Year,
    /// Highest rated first.
    Rating,
}

pub fn run(catalog: &Catalog, filter: &EntryFilter, sort: SortBy) -> Result<CmdResult> {
    let mut entries: Vec<_> = catalog.query(filter).cloned().collect();

    match sort {
        SortBy::Added => {}
        SortBy::Title => entries.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortBy::Year => entries.sort_by_key(|e| e.year),
        SortBy::Rating => entries.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    let mut result = CmdResult::default().with_listed(entries);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No entries found."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::EntryKind;
    use crate::validate::EntryDraft;

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        let mut heat = EntryDraft::movie("Heat", 1995);
        heat.rating = 9.0;
        add::run(&mut catalog, &heat).unwrap();
        let mut alien = EntryDraft::movie("Alien", 1979);
        alien.rating = 9.5;
        add::run(&mut catalog, &alien).unwrap();
        add::run(&mut catalog, &EntryDraft::series("Dark", "2017-20")).unwrap();
        catalog
    }

    #[test]
    fn default_sort_is_stored_order() {
        let catalog = seeded();
        let result = run(&catalog, &EntryFilter::default(), SortBy::Added).unwrap();
        let titles: Vec<_> = result.listed.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Alien", "Dark"]);
    }

    #[test]
    fn sorting_does_not_mutate_store_order() {
        let catalog = seeded();
        run(&catalog, &EntryFilter::default(), SortBy::Title).unwrap();
        let titles: Vec<_> = catalog.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Alien", "Dark"]);
    }

    #[test]
    fn rating_sort_is_descending() {
        let catalog = seeded();
        let result = run(&catalog, &EntryFilter::default(), SortBy::Rating).unwrap();
        assert_eq!(result.listed[0].title, "Alien");
    }

    #[test]
    fn kind_filter_applies() {
        let catalog = seeded();
        let filter = EntryFilter {
            kind: Some(EntryKind::Series),
            ..Default::default()
        };
        let result = run(&catalog, &filter, SortBy::Added).unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].title, "Dark");
    }
}
