use chrono::{Datelike, NaiveDate, Utc};
use std::fmt;

/// Content scores are integers on a 0..=5 scale.
pub const SCORE_MAX: u8 = 5;
/// Personal ratings live on a 0..=10 scale.
pub const RATING_MAX: f32 = 10.0;
/// First year of commercial film. Nothing in the catalog predates it.
pub const YEAR_MIN: i32 = 1888;

/// Upper bound for plausible years: announced titles may sit two years out.
pub fn year_max() -> i32 {
    Utc::now().year() + 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Movie,
    Series,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Movie => write!(f, "Movie"),
            EntryKind::Series => write!(f, "Series"),
        }
    }
}

impl EntryKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Movie" => Some(EntryKind::Movie),
            "Series" => Some(EntryKind::Series),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchStatus {
    #[default]
    Watched,
    PlanToWatch,
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchStatus::Watched => write!(f, "Watched"),
            WatchStatus::PlanToWatch => write!(f, "Plan to Watch"),
        }
    }
}

impl WatchStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Watched" => Some(WatchStatus::Watched),
            "Plan to Watch" => Some(WatchStatus::PlanToWatch),
            _ => None,
        }
    }
}

/// Per-dimension content scores, each clamped to `0..=SCORE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentScores {
    pub romance: u8,
    pub comedy: u8,
    pub action: u8,
    pub intimacy: u8,
    pub violence: u8,
    pub nudity: u8,
}

/// Column labels for the score dimensions, in canonical order.
pub const SCORE_DIMENSIONS: [&str; 6] = [
    "Romance", "Comedy", "Action", "Intimacy", "Violence", "Nudity",
];

impl ContentScores {
    /// Returns a copy with every dimension clamped into `0..=SCORE_MAX`.
    pub fn clamped(self) -> Self {
        Self {
            romance: self.romance.min(SCORE_MAX),
            comedy: self.comedy.min(SCORE_MAX),
            action: self.action.min(SCORE_MAX),
            intimacy: self.intimacy.min(SCORE_MAX),
            violence: self.violence.min(SCORE_MAX),
            nudity: self.nudity.min(SCORE_MAX),
        }
    }

    /// Family-friendly iff none of the sensitive dimensions exceeds 2.
    pub fn is_family_friendly(&self) -> bool {
        self.intimacy <= 2 && self.violence <= 2 && self.nudity <= 2
    }

    /// Warning labels for every dimension scored above zero, e.g.
    /// `"Violence/Abuse (4/5)"`. Empty for an all-zero set.
    pub fn warnings(&self) -> Vec<String> {
        const LABELS: [&str; 6] = [
            "Romance",
            "Comedy",
            "Action",
            "Intimate Scenes",
            "Violence/Abuse",
            "Nudity",
        ];
        LABELS
            .iter()
            .zip(self.as_array())
            .filter(|(_, score)| *score > 0)
            .map(|(label, score)| format!("{} ({}/{})", label, score, SCORE_MAX))
            .collect()
    }

    /// Scores in `SCORE_DIMENSIONS` order, for aggregation.
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.romance,
            self.comedy,
            self.action,
            self.intimacy,
            self.violence,
            self.nudity,
        ]
    }
}

/// A series' run, e.g. `2008-2013`. An open end means still airing (or unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: i32, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// Parses `"2008"`, `"2008-2013"`, and the legacy two-digit form `"2008-13"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.split_once('-') {
            None => {
                let start = s.parse().ok()?;
                Some(Self { start, end: None })
            }
            Some((start, end)) => {
                let start: i32 = start.trim().parse().ok()?;
                let end = end.trim();
                if end.is_empty() {
                    return Some(Self { start, end: None });
                }
                let mut end: i32 = end.parse().ok()?;
                if end < 100 {
                    // Two-digit ends inherit the start's century.
                    end += (start / 100) * 100;
                }
                Some(Self {
                    start,
                    end: Some(end),
                })
            }
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

/// Identity of an entry for duplicate detection and lookup.
///
/// Titles compare case-insensitively so "Heat" and "heat" collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    title: String,
    pub year: i32,
    pub kind: EntryKind,
}

impl EntryKey {
    pub fn new(title: &str, year: i32, kind: EntryKind) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            year,
            kind,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.year, self.kind)
    }
}

/// Fields specific to the Series variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesDetails {
    pub seasons: u32,
    pub episodes_watched: u32,
    pub years: YearRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    Movie,
    Series(SeriesDetails),
}

/// A single catalog item, movie or series.
///
/// Construct through [`crate::validate::validate`] so clamping and field checks
/// apply; fields are public for reading and for the commands layer, which
/// re-validates before handing edits back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f32,
    pub status: WatchStatus,
    pub notes: String,
    pub scores: ContentScores,
    pub date_added: NaiveDate,
    pub details: Details,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self.details {
            Details::Movie => EntryKind::Movie,
            Details::Series(_) => EntryKind::Series,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.title, self.year, self.kind())
    }

    /// Derived, never stored: recomputed from the scores on every call.
    pub fn family_friendly(&self) -> bool {
        self.scores.is_family_friendly()
    }

    /// Per-dimension warning labels, see [`ContentScores::warnings`].
    pub fn content_warnings(&self) -> Vec<String> {
        self.scores.warnings()
    }

    pub fn series(&self) -> Option<&SeriesDetails> {
        match &self.details {
            Details::Series(d) => Some(d),
            Details::Movie => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_friendly_threshold_is_exclusive() {
        let mut scores = ContentScores {
            intimacy: 2,
            violence: 2,
            nudity: 2,
            ..Default::default()
        };
        assert!(scores.is_family_friendly());
        scores.violence = 3;
        assert!(!scores.is_family_friendly());
    }

    #[test]
    fn clamping_caps_each_dimension() {
        let scores = ContentScores {
            romance: 9,
            comedy: 5,
            ..Default::default()
        }
        .clamped();
        assert_eq!(scores.romance, 5);
        assert_eq!(scores.comedy, 5);
        assert_eq!(scores.action, 0);
    }

    #[test]
    fn warnings_list_only_nonzero_dimensions() {
        let scores = ContentScores {
            violence: 4,
            comedy: 1,
            ..Default::default()
        };
        assert_eq!(
            scores.warnings(),
            vec!["Comedy (1/5)".to_string(), "Violence/Abuse (4/5)".to_string()]
        );
        assert!(ContentScores::default().warnings().is_empty());
    }

    #[test]
    fn year_range_parses_two_digit_end() {
        let range = YearRange::parse("2008-13").unwrap();
        assert_eq!(range, YearRange::new(2008, Some(2013)));
        assert_eq!(range.to_string(), "2008-2013");
    }

    #[test]
    fn year_range_open_end() {
        assert_eq!(YearRange::parse("2020"), Some(YearRange::new(2020, None)));
        assert_eq!(YearRange::parse("2020-"), Some(YearRange::new(2020, None)));
        assert_eq!(YearRange::parse("n/a"), None);
    }

    #[test]
    fn keys_compare_case_insensitively() {
        let a = EntryKey::new("Heat", 1995, EntryKind::Movie);
        let b = EntryKey::new("heat ", 1995, EntryKind::Movie);
        assert_eq!(a, b);
        let c = EntryKey::new("Heat", 1995, EntryKind::Series);
        assert_ne!(a, c);
    }
}
