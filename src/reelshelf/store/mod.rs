//! # Storage Layer
//!
//! Two halves, split across this module and [`csv`]:
//!
//! - [`Catalog`]: the in-memory ordered collection. Owns every entry for the
//!   process lifetime, preserves insertion/load order for stable display, and
//!   enforces identity-key uniqueness. Pure data structure, no I/O.
//!
//! - [`csv::CsvStore`]: loads and saves the whole catalog from/to a single CSV
//!   file. Malformed rows are per-row failures (skipped and logged), never
//!   fatal to the load.
//!
//! Sorting for presentation happens in the commands layer on a copy; the
//! stored order is never rearranged.

use crate::error::{Result, ShelfError};
use crate::model::{Entry, EntryKey, EntryKind, WatchStatus, SCORE_MAX};
use std::collections::BTreeMap;

pub mod csv;

/// Filter predicates for [`Catalog::query`]. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub title_contains: Option<String>,
    pub genre: Option<String>,
    pub kind: Option<EntryKind>,
    pub status: Option<WatchStatus>,
    pub family_friendly: Option<bool>,
    pub min_rating: Option<f32>,
    pub max_rating: Option<f32>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(term) = &self.title_contains {
            if !entry.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !entry.genre.eq_ignore_ascii_case(genre) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind() != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if entry.status != status {
                return false;
            }
        }
        if let Some(ff) = self.family_friendly {
            if entry.family_friendly() != ff {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if entry.rating < min {
                return false;
            }
        }
        if let Some(max) = self.max_rating {
            if entry.rating > max {
                return false;
            }
        }
        true
    }
}

/// Summary statistics over a catalog snapshot.
///
/// Averages ignore zero ratings (an unrated entry is stored as 0.0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    pub total_movies: usize,
    pub total_series: usize,
    pub avg_movie_rating: f32,
    pub avg_series_rating: f32,
    pub family_friendly_movies: usize,
    pub family_friendly_series: usize,
    pub genres: BTreeMap<String, usize>,
    /// `score_histogram[d][s]` counts entries scoring `s` on dimension `d`,
    /// dimensions in [`crate::model::SCORE_DIMENSIONS`] order.
    pub score_histogram: [[u32; SCORE_MAX as usize + 1]; 6],
}

impl CatalogStats {
    pub fn total_items(&self) -> usize {
        self.total_movies + self.total_series
    }
}

/// The in-memory ordered collection of entries.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion/load order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    fn position(&self, key: &EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == *key)
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.position(key).map(|i| &self.entries[i])
    }

    /// Appends a new entry. Rejects a duplicate identity key, leaving the
    /// collection unchanged.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        let key = entry.key();
        if self.position(&key).is_some() {
            return Err(ShelfError::DuplicateEntry(key));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Replaces the entry at `key` in place, keeping its position.
    ///
    /// A replacement that changes the identity key must not collide with any
    /// other entry. Returns the previous entry.
    pub fn replace(&mut self, key: &EntryKey, entry: Entry) -> Result<Entry> {
        let index = self
            .position(key)
            .ok_or_else(|| ShelfError::EntryNotFound(key.clone()))?;
        let new_key = entry.key();
        if new_key != *key && self.position(&new_key).is_some() {
            return Err(ShelfError::DuplicateEntry(new_key));
        }
        Ok(std::mem::replace(&mut self.entries[index], entry))
    }

    /// Removes and returns the entry at `key`.
    pub fn remove(&mut self, key: &EntryKey) -> Result<Entry> {
        let index = self
            .position(key)
            .ok_or_else(|| ShelfError::EntryNotFound(key.clone()))?;
        Ok(self.entries.remove(index))
    }

    /// Lazy, restartable view of entries matching `filter`. Read-only; the
    /// iterator borrows the catalog, so it can be rebuilt at any time.
    pub fn query<'a>(&'a self, filter: &'a EntryFilter) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e))
    }

    /// Computes summary statistics over the current snapshot. Pure read.
    pub fn aggregate(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        let mut movie_rating_sum = 0.0f32;
        let mut movie_rated = 0usize;
        let mut series_rating_sum = 0.0f32;
        let mut series_rated = 0usize;

        for entry in &self.entries {
            match entry.kind() {
                EntryKind::Movie => {
                    stats.total_movies += 1;
                    if entry.rating > 0.0 {
                        movie_rating_sum += entry.rating;
                        movie_rated += 1;
                    }
                    if entry.family_friendly() {
                        stats.family_friendly_movies += 1;
                    }
                }
                EntryKind::Series => {
                    stats.total_series += 1;
                    if entry.rating > 0.0 {
                        series_rating_sum += entry.rating;
                        series_rated += 1;
                    }
                    if entry.family_friendly() {
                        stats.family_friendly_series += 1;
                    }
                }
            }

            *stats.genres.entry(entry.genre.clone()).or_insert(0) += 1;

            for (dim, score) in entry.scores.as_array().into_iter().enumerate() {
                stats.score_histogram[dim][score.min(SCORE_MAX) as usize] += 1;
            }
        }

        if movie_rated > 0 {
            stats.avg_movie_rating = movie_rating_sum / movie_rated as f32;
        }
        if series_rated > 0 {
            stats.avg_series_rating = series_rating_sum / series_rated as f32;
        }
        stats
    }
}
