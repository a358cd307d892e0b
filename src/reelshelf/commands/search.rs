use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Entry;
use crate::store::Catalog;

pub fn run(catalog: &Catalog, term: &str) -> Result<CmdResult> {
    let term_lower = term.to_lowercase();

    let mut matches: Vec<(Entry, u8)> = catalog
        .iter()
        .filter_map(|entry| {
            let title_lower = entry.title.to_lowercase();

            let score = if title_lower == term_lower {
                1
            } else if title_lower.contains(&term_lower) {
                2
            } else if entry.genre.to_lowercase().contains(&term_lower) {
                3
            } else if entry.notes.to_lowercase().contains(&term_lower) {
                4
            } else {
                return None;
            };

            Some((entry.clone(), score))
        })
        .collect();

    matches.sort_by(|(a, score_a), (b, score_b)| match score_a.cmp(score_b) {
        std::cmp::Ordering::Equal => match a.title.len().cmp(&b.title.len()) {
            std::cmp::Ordering::Equal => a.year.cmp(&b.year),
            ord => ord,
        },
        ord => ord,
    });

    let listed = matches.into_iter().map(|(entry, _)| entry).collect();
    Ok(CmdResult::default().with_listed(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::validate::EntryDraft;

    #[test]
    fn ranks_exact_title_matches_first() {
        let mut catalog = Catalog::new();
        add::run(&mut catalog, &EntryDraft::movie("Alien Nation", 1988)).unwrap();
        add::run(&mut catalog, &EntryDraft::movie("Alien", 1979)).unwrap();
        let mut noted = EntryDraft::movie("Arrival", 2016);
        noted.notes = "alien first contact".to_string();
        add::run(&mut catalog, &noted).unwrap();

        let result = run(&catalog, "Alien").unwrap();
        assert_eq!(result.listed.len(), 3);
        assert_eq!(result.listed[0].title, "Alien");
        assert_eq!(result.listed[1].title, "Alien Nation");
        assert_eq!(result.listed[2].title, "Arrival");
    }

    #[test]
    fn genre_matches_rank_above_notes() {
        let mut catalog = Catalog::new();
        let mut noted = EntryDraft::movie("Heat", 1995);
        noted.notes = "slow-burn thriller".to_string();
        add::run(&mut catalog, &noted).unwrap();
        let mut genred = EntryDraft::movie("Alien", 1979);
        genred.genre = "Thriller".to_string();
        add::run(&mut catalog, &genred).unwrap();

        let result = run(&catalog, "thriller").unwrap();
        assert_eq!(result.listed[0].title, "Alien");
        assert_eq!(result.listed[1].title, "Heat");
    }
}
