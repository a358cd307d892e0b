//! # Validation Layer
//!
//! Turns raw form/CLI input ([`EntryDraft`]) into a normalized [`Entry`] or a
//! structured [`ValidationError`] listing every offending field.
//!
//! Clamping policy: numeric fields outside their declared bounds are clamped,
//! not rejected. Only two things reject outright: an empty title and a year
//! outside the plausible range (the year is part of an entry's identity, so
//! silently clamping it would change which entry the user meant). Duplicate
//! keys are the store's concern, not this module's — validation is a pure
//! function of its input.

use crate::model::{
    ContentScores, Details, Entry, SeriesDetails, WatchStatus, YearRange, RATING_MAX, SCORE_MAX,
    YEAR_MIN,
};
use chrono::{NaiveDate, Utc};
use std::fmt;

/// Raw, unclamped content scores as submitted. Signed so out-of-range input
/// (`-1`, `7`) survives until the validator normalizes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftScores {
    pub romance: i32,
    pub comedy: i32,
    pub action: i32,
    pub intimacy: i32,
    pub violence: i32,
    pub nudity: i32,
}

impl DraftScores {
    fn clamped(self) -> ContentScores {
        fn clamp(v: i32) -> u8 {
            v.clamp(0, SCORE_MAX as i32) as u8
        }
        ContentScores {
            romance: clamp(self.romance),
            comedy: clamp(self.comedy),
            action: clamp(self.action),
            intimacy: clamp(self.intimacy),
            violence: clamp(self.violence),
            nudity: clamp(self.nudity),
        }
    }
}

/// Variant-specific draft fields. Series years arrive as the raw text form
/// (`"2008-13"`, `"2020"`) and are parsed here.
#[derive(Debug, Clone)]
pub enum DraftKind {
    Movie,
    Series {
        seasons: i64,
        episodes_watched: i64,
        years: String,
    },
}

/// Candidate field set for an entry, prior to validation.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f32,
    pub status: WatchStatus,
    pub notes: String,
    pub scores: DraftScores,
    pub date_added: Option<NaiveDate>,
    pub kind: DraftKind,
}

impl EntryDraft {
    pub fn movie(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
            genre: String::new(),
            rating: 0.0,
            status: WatchStatus::default(),
            notes: String::new(),
            scores: DraftScores::default(),
            date_added: None,
            kind: DraftKind::Movie,
        }
    }

    /// Reconstructs a draft from a stored entry, for the edit path: overlay
    /// the changed fields, then re-validate through the same pipeline as a
    /// fresh entry.
    pub fn from_entry(entry: &Entry) -> Self {
        let scores = entry.scores;
        Self {
            title: entry.title.clone(),
            year: entry.year,
            genre: entry.genre.clone(),
            rating: entry.rating,
            status: entry.status,
            notes: entry.notes.clone(),
            scores: DraftScores {
                romance: scores.romance as i32,
                comedy: scores.comedy as i32,
                action: scores.action as i32,
                intimacy: scores.intimacy as i32,
                violence: scores.violence as i32,
                nudity: scores.nudity as i32,
            },
            date_added: Some(entry.date_added),
            kind: match &entry.details {
                Details::Movie => DraftKind::Movie,
                Details::Series(d) => DraftKind::Series {
                    seasons: d.seasons as i64,
                    episodes_watched: d.episodes_watched as i64,
                    years: d.years.to_string(),
                },
            },
        }
    }

    pub fn series(title: impl Into<String>, years: impl Into<String>) -> Self {
        let years = years.into();
        // The common year field is derived from the range start during
        // validation; seed it so partially-built drafts stay coherent.
        let year = YearRange::parse(&years).map(|r| r.start).unwrap_or(0);
        Self {
            title: title.into(),
            year,
            genre: String::new(),
            rating: 0.0,
            status: WatchStatus::default(),
            notes: String::new(),
            scores: DraftScores::default(),
            date_added: None,
            kind: DraftKind::Series {
                seasons: 0,
                episodes_watched: 0,
                years,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl std::error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid entry: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Validates and normalizes a draft into an [`Entry`].
///
/// Collects every field issue rather than stopping at the first, so a form can
/// highlight all invalid fields in one pass.
pub fn validate(draft: &EntryDraft) -> Result<Entry, ValidationError> {
    let mut issues = Vec::new();

    let title = draft.title.trim().to_string();
    if title.is_empty() {
        issues.push(FieldIssue {
            field: "title",
            problem: "title cannot be empty".to_string(),
        });
    }

    let year_max = crate::model::year_max();

    let (year, details) = match &draft.kind {
        DraftKind::Movie => {
            if draft.year < YEAR_MIN || draft.year > year_max {
                issues.push(FieldIssue {
                    field: "year",
                    problem: format!(
                        "year {} out of range {}..={}",
                        draft.year, YEAR_MIN, year_max
                    ),
                });
            }
            (draft.year, Details::Movie)
        }
        DraftKind::Series {
            seasons,
            episodes_watched,
            years,
        } => {
            let range = match YearRange::parse(years) {
                Some(range) => {
                    if range.start < YEAR_MIN || range.start > year_max {
                        issues.push(FieldIssue {
                            field: "years",
                            problem: format!(
                                "start year {} out of range {}..={}",
                                range.start, YEAR_MIN, year_max
                            ),
                        });
                    }
                    if let Some(end) = range.end {
                        if end < range.start {
                            issues.push(FieldIssue {
                                field: "years",
                                problem: format!("end year {} precedes start {}", end, range.start),
                            });
                        }
                    }
                    range
                }
                None => {
                    issues.push(FieldIssue {
                        field: "years",
                        problem: format!("unparseable year range {:?}", years),
                    });
                    YearRange::new(0, None)
                }
            };
            let details = Details::Series(SeriesDetails {
                seasons: (*seasons).clamp(0, u32::MAX as i64) as u32,
                episodes_watched: (*episodes_watched).clamp(0, u32::MAX as i64) as u32,
                years: range,
            });
            (range.start, details)
        }
    };

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    let genre = draft.genre.trim();
    let genre = if genre.is_empty() {
        "Unknown".to_string()
    } else {
        genre.to_string()
    };

    let rating = if draft.rating.is_finite() {
        draft.rating.clamp(0.0, RATING_MAX)
    } else {
        0.0
    };

    Ok(Entry {
        title,
        year,
        genre,
        rating,
        status: draft.status,
        notes: draft.notes.trim().to_string(),
        scores: draft.scores.clamped(),
        date_added: draft
            .date_added
            .unwrap_or_else(|| Utc::now().date_naive()),
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_title() {
        let draft = EntryDraft::movie("   ", 1999);
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field, "title");
    }

    #[test]
    fn rejects_year_out_of_range() {
        let draft = EntryDraft::movie("Metropolis", 1492);
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.issues[0].field, "year");
    }

    #[test]
    fn collects_multiple_issues() {
        let draft = EntryDraft::movie("", 1492);
        let err = validate(&draft).unwrap_err();
        let fields: Vec<_> = err.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["title", "year"]);
    }

    #[test]
    fn clamps_scores_instead_of_rejecting() {
        let mut draft = EntryDraft::movie("Heat", 1995);
        draft.scores.violence = 7;
        draft.scores.romance = -1;
        let entry = validate(&draft).unwrap();
        assert_eq!(entry.scores.violence, 5);
        assert_eq!(entry.scores.romance, 0);
    }

    #[test]
    fn clamps_rating_to_scale() {
        let mut draft = EntryDraft::movie("Heat", 1995);
        draft.rating = 12.5;
        assert_eq!(validate(&draft).unwrap().rating, 10.0);
        draft.rating = -3.0;
        assert_eq!(validate(&draft).unwrap().rating, 0.0);
        draft.rating = f32::NAN;
        assert_eq!(validate(&draft).unwrap().rating, 0.0);
    }

    #[test]
    fn defaults_blank_genre() {
        let entry = validate(&EntryDraft::movie("Heat", 1995)).unwrap();
        assert_eq!(entry.genre, "Unknown");
    }

    #[test]
    fn series_year_derives_from_range_start() {
        let mut draft = EntryDraft::series("Breaking Bad", "2008-13");
        if let DraftKind::Series { seasons, .. } = &mut draft.kind {
            *seasons = 5;
        }
        let entry = validate(&draft).unwrap();
        assert_eq!(entry.year, 2008);
        let details = entry.series().unwrap();
        assert_eq!(details.seasons, 5);
        assert_eq!(details.years.end, Some(2013));
    }

    #[test]
    fn series_rejects_inverted_range() {
        let draft = EntryDraft::series("Lost", "2010-2004");
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.issues[0].field, "years");
    }

    #[test]
    fn negative_series_counters_clamp_to_zero() {
        let mut draft = EntryDraft::series("Dark", "2017-20");
        if let DraftKind::Series {
            seasons,
            episodes_watched,
            ..
        } = &mut draft.kind
        {
            *seasons = -2;
            *episodes_watched = -10;
        }
        let entry = validate(&draft).unwrap();
        let details = entry.series().unwrap();
        assert_eq!(details.seasons, 0);
        assert_eq!(details.episodes_watched, 0);
    }
}
