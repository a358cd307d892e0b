use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShelfError};
use crate::model::{EntryKey, WatchStatus};
use crate::store::Catalog;
use crate::validate::{validate, DraftKind, EntryDraft};

/// Field updates for an existing entry. Unset fields keep their value; the
/// merged draft goes through the same validation as a fresh entry, so clamping
/// and the family-friendly derivation apply to edits too.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub rating: Option<f32>,
    pub status: Option<WatchStatus>,
    pub notes: Option<String>,
    pub romance: Option<i32>,
    pub comedy: Option<i32>,
    pub action: Option<i32>,
    pub intimacy: Option<i32>,
    pub violence: Option<i32>,
    pub nudity: Option<i32>,
    pub seasons: Option<i64>,
    pub episodes_watched: Option<i64>,
    pub years: Option<String>,
}

impl EntryPatch {
    fn touches_series_fields(&self) -> bool {
        self.seasons.is_some() || self.episodes_watched.is_some() || self.years.is_some()
    }
}

pub fn run(catalog: &mut Catalog, key: &EntryKey, patch: &EntryPatch) -> Result<CmdResult> {
    let current = catalog
        .get(key)
        .ok_or_else(|| ShelfError::EntryNotFound(key.clone()))?;

    let mut draft = EntryDraft::from_entry(current);

    if let Some(title) = &patch.title {
        draft.title = title.clone();
    }
    if let Some(genre) = &patch.genre {
        draft.genre = genre.clone();
    }
    if let Some(rating) = patch.rating {
        draft.rating = rating;
    }
    if let Some(status) = patch.status {
        draft.status = status;
    }
    if let Some(notes) = &patch.notes {
        draft.notes = notes.clone();
    }
    if let Some(v) = patch.romance {
        draft.scores.romance = v;
    }
    if let Some(v) = patch.comedy {
        draft.scores.comedy = v;
    }
    if let Some(v) = patch.action {
        draft.scores.action = v;
    }
    if let Some(v) = patch.intimacy {
        draft.scores.intimacy = v;
    }
    if let Some(v) = patch.violence {
        draft.scores.violence = v;
    }
    if let Some(v) = patch.nudity {
        draft.scores.nudity = v;
    }

    match &mut draft.kind {
        DraftKind::Movie => {
            if patch.touches_series_fields() {
                return Err(ShelfError::Api(
                    "seasons, episodes and year ranges only apply to series".to_string(),
                ));
            }
            if let Some(year) = patch.year {
                draft.year = year;
            }
        }
        DraftKind::Series {
            seasons,
            episodes_watched,
            years,
        } => {
            if patch.year.is_some() {
                return Err(ShelfError::Api(
                    "use --years to change a series' run".to_string(),
                ));
            }
            if let Some(v) = patch.seasons {
                *seasons = v;
            }
            if let Some(v) = patch.episodes_watched {
                *episodes_watched = v;
            }
            if let Some(v) = &patch.years {
                *years = v.clone();
            }
        }
    }

    let updated = validate(&draft)?;
    catalog.replace(key, updated.clone())?;
    tracing::info!(%key, "entry updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated: {} ({})",
        updated.title, updated.year
    )));
    result.affected.push(updated);
    Ok(result)
}
