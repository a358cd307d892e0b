//! CSV persistence for the catalog.
//!
//! One file, one row per entry, fixed header order. Both variants share the
//! schema; variant-specific columns (`Years`, `Seasons`, `Episodes Watched`)
//! are blank for movies. Rows that fail required-field checks are skipped and
//! logged, never fatal to the load. The family-friendly flag is not a column:
//! it is derived from the scores after every load.

use super::Catalog;
use crate::error::Result;
use crate::model::{Details, Entry, EntryKind, WatchStatus};
use crate::validate::{validate, DraftKind, DraftScores, EntryDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Flat row shape matching the on-disk header. Everything is a string so a
/// single bad cell fails row conversion, not CSV deserialization of the file.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Years")]
    years: String,
    #[serde(rename = "Seasons")]
    seasons: String,
    #[serde(rename = "Episodes Watched")]
    episodes_watched: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Notes")]
    notes: String,
    #[serde(rename = "Romance")]
    romance: String,
    #[serde(rename = "Comedy")]
    comedy: String,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Intimacy")]
    intimacy: String,
    #[serde(rename = "Violence")]
    violence: String,
    #[serde(rename = "Nudity")]
    nudity: String,
    #[serde(rename = "Date Added")]
    date_added: String,
}

/// Outcome of a load: the catalog plus how many rows were dropped.
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub skipped: usize,
}

/// Loads and saves the full collection from/to one CSV file.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file into an ordered catalog.
    ///
    /// A missing or unreadable file is the caller's problem (surfaced as an
    /// error); a bad row is ours (skipped with a warning).
    pub fn load(&self) -> Result<LoadReport> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let mut catalog = Catalog::new();
        let mut skipped = 0usize;

        for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
            let line = i + 2; // 1-based, after the header
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    warn!(line, error = %e, "skipping malformed row");
                    skipped += 1;
                    continue;
                }
            };
            let entry = match record_to_entry(&record) {
                Ok(entry) => entry,
                Err(reason) => {
                    warn!(line, %reason, "skipping invalid row");
                    skipped += 1;
                    continue;
                }
            };
            if let Err(e) = catalog.insert(entry) {
                warn!(line, error = %e, "skipping duplicate row");
                skipped += 1;
            }
        }

        info!(
            path = %self.path.display(),
            entries = catalog.len(),
            skipped,
            "catalog loaded"
        );
        Ok(LoadReport { catalog, skipped })
    }

    /// Serializes the catalog back to the file, overwriting it.
    ///
    /// The rewrite goes through a sibling temp file and a rename, so a failed
    /// write leaves the previous file (and its backups) intact.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            for entry in catalog.iter() {
                writer.serialize(entry_to_record(entry))?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), entries = catalog.len(), "catalog saved");
        Ok(())
    }
}

fn parse_score(field: &'static str, value: &str) -> std::result::Result<i32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    // Legacy exports wrote scores as floats ("3.0").
    value
        .parse::<f64>()
        .map(|v| v as i32)
        .map_err(|_| format!("bad {} score {:?}", field, value))
}

fn record_to_entry(record: &CsvRecord) -> std::result::Result<Entry, String> {
    let kind = EntryKind::parse(&record.kind)
        .ok_or_else(|| format!("unknown type {:?}", record.kind))?;

    let kind = match kind {
        EntryKind::Movie => DraftKind::Movie,
        EntryKind::Series => DraftKind::Series {
            seasons: parse_score("Seasons", &record.seasons)? as i64,
            episodes_watched: parse_score("Episodes Watched", &record.episodes_watched)? as i64,
            years: if record.years.trim().is_empty() {
                record.year.clone()
            } else {
                record.years.clone()
            },
        },
    };

    let year = match record.year.trim() {
        "" => 0,
        y => y
            .parse::<i32>()
            .map_err(|_| format!("bad year {:?}", record.year))?,
    };

    let rating = match record.rating.trim() {
        "" => 0.0,
        r => r
            .parse::<f32>()
            .map_err(|_| format!("bad rating {:?}", record.rating))?,
    };

    let status = match record.status.trim() {
        "" => WatchStatus::default(),
        s => WatchStatus::parse(s).ok_or_else(|| format!("unknown status {:?}", s))?,
    };

    let date_added = match record.date_added.trim() {
        "" => None,
        d => Some(
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| format!("bad date {:?}", d))?,
        ),
    };

    let draft = EntryDraft {
        title: record.title.clone(),
        year,
        genre: record.genre.clone(),
        rating,
        status,
        notes: record.notes.clone(),
        scores: DraftScores {
            romance: parse_score("Romance", &record.romance)?,
            comedy: parse_score("Comedy", &record.comedy)?,
            action: parse_score("Action", &record.action)?,
            intimacy: parse_score("Intimacy", &record.intimacy)?,
            violence: parse_score("Violence", &record.violence)?,
            nudity: parse_score("Nudity", &record.nudity)?,
        },
        date_added,
        kind,
    };

    validate(&draft).map_err(|e| e.to_string())
}

fn entry_to_record(entry: &Entry) -> CsvRecord {
    let (years, seasons, episodes_watched) = match &entry.details {
        Details::Movie => (String::new(), String::new(), String::new()),
        Details::Series(d) => (
            d.years.to_string(),
            d.seasons.to_string(),
            d.episodes_watched.to_string(),
        ),
    };
    let scores = entry.scores;
    CsvRecord {
        title: entry.title.clone(),
        kind: entry.kind().to_string(),
        year: entry.year.to_string(),
        years,
        seasons,
        episodes_watched,
        rating: entry.rating.to_string(),
        genre: entry.genre.clone(),
        status: entry.status.to_string(),
        notes: entry.notes.clone(),
        romance: scores.romance.to_string(),
        comedy: scores.comedy.to_string(),
        action: scores.action.to_string(),
        intimacy: scores.intimacy.to_string(),
        violence: scores.violence.to_string(),
        nudity: scores.nudity.to_string(),
        date_added: entry.date_added.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "Title,Type,Year,Years,Seasons,Episodes Watched,Rating,Genre,Status,\
                          Notes,Romance,Comedy,Action,Intimacy,Violence,Nudity,Date Added";

    fn write_csv(dir: &TempDir, rows: &[&str]) -> CsvStore {
        let path = dir.path().join("watched.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        CsvStore::new(path)
    }

    #[test]
    fn loads_both_variants() {
        let dir = TempDir::new().unwrap();
        let store = write_csv(
            &dir,
            &[
                "Heat,Movie,1995,,,,9.5,Crime,Watched,,1,0,4,1,3,0,2024-01-02",
                "Dark,Series,2017,2017-20,3,26,8,Sci-Fi,Watched,,1,0,2,2,2,0,2024-01-03",
            ],
        );
        let report = store.load().unwrap();
        assert_eq!(report.catalog.len(), 2);
        assert_eq!(report.skipped, 0);

        let entries: Vec<_> = report.catalog.iter().collect();
        assert_eq!(entries[0].kind(), EntryKind::Movie);
        assert!(!entries[0].family_friendly()); // violence 3

        let details = entries[1].series().unwrap();
        assert_eq!(details.seasons, 3);
        assert_eq!(details.years.end, Some(2020));
    }

    #[test]
    fn row_missing_title_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = write_csv(
            &dir,
            &[
                ",Movie,1995,,,,9.5,Crime,Watched,,0,0,0,0,0,0,2024-01-02",
                "Alien,Movie,1979,,,,9,Horror,Watched,,0,0,3,0,2,0,2024-01-02",
            ],
        );
        let report = store.load().unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn duplicate_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = write_csv(
            &dir,
            &[
                "Heat,Movie,1995,,,,9.5,Crime,Watched,,0,0,0,0,0,0,2024-01-02",
                "heat,Movie,1995,,,,2,Crime,Watched,,0,0,0,0,0,0,2024-01-02",
            ],
        );
        let report = store.load().unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn missing_file_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("absent.csv"));
        assert!(store.load().is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = write_csv(
            &dir,
            &[
                "Heat,Movie,1995,,,,9.5,Crime,Watched,\"Long, great\",1,0,4,1,3,0,2024-01-02",
                "Bluey,Series,2018,2018,3,51,10,Kids,Watched,,0,2,0,0,0,0,2024-02-10",
            ],
        );
        let first = store.load().unwrap().catalog;

        let copy_path = dir.path().join("copy.csv");
        let copy = CsvStore::new(copy_path);
        copy.save(&first).unwrap();
        let second = copy.load().unwrap().catalog;

        let a: Vec<_> = first.iter().collect();
        let b: Vec<_> = second.iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn legacy_float_scores_accepted() {
        let dir = TempDir::new().unwrap();
        let store = write_csv(
            &dir,
            &["Up,Movie,2009,,,,8,Animation,Watched,,2.0,4.0,1.0,0.0,0.0,0.0,"],
        );
        let report = store.load().unwrap();
        let entry = report.catalog.iter().next().unwrap();
        assert_eq!(entry.scores.comedy, 4);
    }

    #[test]
    fn failed_write_leaves_no_tmp_behind_on_success() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("watched.csv"));
        store.save(&Catalog::new()).unwrap();
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
