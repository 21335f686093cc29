//! Diary entries, the date-keyed store and calendar marker derivation.
//!
//! # Responsibility
//! - Define the persisted diary shapes and their pure store operations.
//! - Derive calendar decorations from store contents.
//!
//! # Invariants
//! - A date key exists in the store iff a saved entry exists for that date.
//! - `upsert` refuses entries without a mood; entry text may be empty.
//! - Store operations never mutate their input; callers commit the result.

use crate::model::mood::{MoodCatalog, MoodId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One diary entry; at most one exists per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub mood: Option<MoodId>,
    pub text: String,
}

/// Date-keyed mapping of saved entries, serialized wholesale as one blob.
///
/// Keys serialize as ISO `YYYY-MM-DD` strings, matching the stored JSON
/// shape `{"2024-03-01":{"mood":"feliz","text":"..."}}`.
pub type DiaryStore = BTreeMap<NaiveDate, DiaryEntry>;

/// Validation failures for entry writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiaryValidationError {
    MoodRequired,
}

impl Display for DiaryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoodRequired => write!(f, "Por favor, selecione um humor."),
        }
    }
}

impl Error for DiaryValidationError {}

/// Returns a copy of `store` with `date -> entry` added or replaced.
///
/// Rejects entries without a mood; mood selection is mandatory before a
/// save reaches the store.
pub fn upsert(
    store: &DiaryStore,
    date: NaiveDate,
    entry: DiaryEntry,
) -> Result<DiaryStore, DiaryValidationError> {
    if entry.mood.is_none() {
        return Err(DiaryValidationError::MoodRequired);
    }

    let mut next = store.clone();
    next.insert(date, entry);
    Ok(next)
}

/// Returns a copy of `store` without `date`; absent dates are a no-op.
pub fn remove(store: &DiaryStore, date: NaiveDate) -> DiaryStore {
    let mut next = store.clone();
    next.remove(&date);
    next
}

/// Calendar decoration for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarker {
    pub has_dot: bool,
    pub dot_color: Option<&'static str>,
    pub is_selected: bool,
    pub selected_color: Option<&'static str>,
}

/// Derives calendar markers for every stored entry plus the selected day.
///
/// Each date whose entry mood resolves in `catalog` gets a dot in that
/// mood's color. The selected date additionally gets a highlight in its own
/// entry's mood color, falling back to the catalog default when it has no
/// entry yet. Pure over its inputs; callers may re-run it freely.
pub fn markers_for(
    store: &DiaryStore,
    selected: NaiveDate,
    catalog: &MoodCatalog,
) -> BTreeMap<NaiveDate, DayMarker> {
    let mut markers = BTreeMap::new();

    for (date, entry) in store {
        let Some(color) = entry.mood.and_then(|mood| catalog.color(mood)) else {
            continue;
        };
        markers.insert(
            *date,
            DayMarker {
                has_dot: true,
                dot_color: Some(color),
                is_selected: false,
                selected_color: None,
            },
        );
    }

    let highlight = catalog.highlight_color(store.get(&selected).and_then(|entry| entry.mood));
    let marker = markers.entry(selected).or_insert(DayMarker {
        has_dot: false,
        dot_color: None,
        is_selected: false,
        selected_color: None,
    });
    marker.is_selected = true;
    marker.selected_color = Some(highlight);

    markers
}
