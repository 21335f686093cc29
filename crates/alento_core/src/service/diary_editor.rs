//! # Responsibility
//! Screen state for the diary: the loaded store, per-day drafts,
//! transient feedback flags, and the two-step delete confirmation.
//!
//! # Invariants
//! - The in-memory store changes only after the repository confirmed the
//!   durable write; a failed write leaves the editor state untouched.
//! - Switching the selected date rebuilds the drafts from the stored
//!   entry and drops every transient flag.
//!
//! # See also
//! - `crate::model::diary` for the pure store operations this drives.
//! - `crate::repo::diary_repo` for the persistence seam.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use log::{error, info};

use crate::model::diary::{
    markers_for, remove, upsert, DayMarker, DiaryEntry, DiaryStore, DiaryValidationError,
};
use crate::model::mood::{MoodCatalog, MoodId};
use crate::repo::diary_repo::DiaryRepository;
use crate::repo::StoreError;

/// Feedback after saving a day that had no entry yet.
pub const FEEDBACK_SAVED: &str = "Sentimento registrado!";
/// Feedback after overwriting an existing entry.
pub const FEEDBACK_EDITED: &str = "Anotação editada com sucesso!";
/// Feedback after a confirmed delete.
pub const FEEDBACK_DELETED: &str = "Anotação deletada!";

/// Copy for the delete confirmation dialog.
pub const DELETE_CONFIRM_TITLE: &str = "Deletar Anotação";
pub const DELETE_CONFIRM_BODY: &str =
    "Você tem certeza que deseja deletar a anotação para este dia?";
pub const DELETE_CONFIRM_ACTION: &str = "Deletar";
pub const DELETE_CONFIRM_CANCEL: &str = "Cancelar";

/// Whether a successful save created the day's entry or replaced it.
///
/// Decided from the store as it was before the write, so the feedback
/// matches what the user actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Edited,
}

impl SaveKind {
    /// User-facing feedback line for this outcome.
    pub fn feedback(self) -> &'static str {
        match self {
            SaveKind::Created => FEEDBACK_SAVED,
            SaveKind::Edited => FEEDBACK_EDITED,
        }
    }

    fn log_name(self) -> &'static str {
        match self {
            SaveKind::Created => "created",
            SaveKind::Edited => "edited",
        }
    }
}

/// Failure while saving or deleting through the editor.
#[derive(Debug)]
pub enum DiaryEditorError {
    /// The draft is not valid; the message is shown inline.
    Validation(DiaryValidationError),
    /// The durable write failed; in-memory state was not committed.
    Persist(StoreError),
}

impl fmt::Display for DiaryEditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiaryEditorError::Validation(err) => write!(f, "{err}"),
            DiaryEditorError::Persist(err) => write!(f, "diary write failed: {err}"),
        }
    }
}

impl Error for DiaryEditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiaryEditorError::Validation(err) => Some(err),
            DiaryEditorError::Persist(err) => Some(err),
        }
    }
}

impl From<DiaryValidationError> for DiaryEditorError {
    fn from(err: DiaryValidationError) -> Self {
        DiaryEditorError::Validation(err)
    }
}

impl From<StoreError> for DiaryEditorError {
    fn from(err: StoreError) -> Self {
        DiaryEditorError::Persist(err)
    }
}

/// Stateful editor behind the diary screen.
pub struct DiaryEditor {
    catalog: MoodCatalog,
    store: DiaryStore,
    selected: NaiveDate,
    draft_mood: Option<MoodId>,
    draft_text: String,
    validation_error: Option<DiaryValidationError>,
    is_saved: bool,
    is_deleted: bool,
    was_editing: bool,
    is_input_focused: bool,
    delete_pending: bool,
}

impl DiaryEditor {
    /// Loads the store and opens the editor on `selected`.
    ///
    /// `initial_mood` pre-selects a mood handed over by another screen;
    /// it applies only when the selected day does not already carry one.
    pub fn open<R: DiaryRepository>(
        repo: &R,
        catalog: MoodCatalog,
        selected: NaiveDate,
        initial_mood: Option<MoodId>,
    ) -> Self {
        let store = repo.load();
        let mut editor = Self {
            catalog,
            store,
            selected,
            draft_mood: None,
            draft_text: String::new(),
            validation_error: None,
            is_saved: false,
            is_deleted: false,
            was_editing: false,
            is_input_focused: false,
            delete_pending: false,
        };
        editor.reset_for_selected();
        if editor.draft_mood.is_none() {
            editor.draft_mood = initial_mood;
        }
        info!(
            "event=diary_open module=service status=ok entries={} selected={}",
            editor.store.len(),
            editor.selected
        );
        editor
    }

    /// Rebuilds the drafts from the stored entry for the selected date
    /// and drops the transient flags.
    fn reset_for_selected(&mut self) {
        match self.store.get(&self.selected) {
            Some(entry) => {
                self.draft_mood = entry.mood;
                self.draft_text = entry.text.clone();
            }
            None => {
                self.draft_mood = None;
                self.draft_text.clear();
            }
        }
        self.is_saved = false;
        self.is_deleted = false;
        self.is_input_focused = false;
        self.delete_pending = false;
        if self.draft_mood.is_some() {
            self.validation_error = None;
        }
    }

    /// Moves the editor to another day.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        self.reset_for_selected();
    }

    /// Sets the draft mood; a chosen mood clears the inline validation.
    pub fn set_mood(&mut self, mood: MoodId) {
        self.draft_mood = Some(mood);
        self.validation_error = None;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    pub fn set_input_focused(&mut self, focused: bool) {
        self.is_input_focused = focused;
    }

    /// Validates the draft and persists the updated store.
    ///
    /// The durable write happens first; only its success commits the new
    /// store and raises the saved flag.
    pub fn save<R: DiaryRepository>(&mut self, repo: &R) -> Result<SaveKind, DiaryEditorError> {
        let entry = DiaryEntry {
            mood: self.draft_mood,
            text: self.draft_text.clone(),
        };
        let editing = self.store.contains_key(&self.selected);
        let next = match upsert(&self.store, self.selected, entry) {
            Ok(next) => next,
            Err(err) => {
                self.validation_error = Some(err.clone());
                return Err(err.into());
            }
        };
        if let Err(err) = repo.persist(&next) {
            error!("event=diary_save module=service status=error error={err}");
            return Err(err.into());
        }

        self.store = next;
        self.was_editing = editing;
        self.is_saved = true;
        self.is_deleted = false;
        let kind = if editing {
            SaveKind::Edited
        } else {
            SaveKind::Created
        };
        info!(
            "event=diary_save module=service status=ok kind={} entries={}",
            kind.log_name(),
            self.store.len()
        );
        Ok(kind)
    }

    /// First step of the delete flow; the screen shows the confirmation.
    pub fn request_delete(&mut self) {
        self.delete_pending = true;
    }

    /// Dismisses the confirmation without touching the store.
    pub fn cancel_delete(&mut self) {
        self.delete_pending = false;
    }

    /// Second step of the delete flow.
    ///
    /// Returns `Ok(false)` without writing when the selected day has no
    /// entry. Otherwise persists the shrunken store first and commits it
    /// on success, clearing the drafts for the now-empty day.
    pub fn confirm_delete<R: DiaryRepository>(
        &mut self,
        repo: &R,
    ) -> Result<bool, DiaryEditorError> {
        self.delete_pending = false;
        if !self.store.contains_key(&self.selected) {
            return Ok(false);
        }

        let next = remove(&self.store, self.selected);
        if let Err(err) = repo.persist(&next) {
            error!("event=diary_delete module=service status=error error={err}");
            return Err(err.into());
        }

        self.store = next;
        self.draft_mood = None;
        self.draft_text.clear();
        self.is_deleted = true;
        self.is_saved = false;
        info!(
            "event=diary_delete module=service status=ok entries={}",
            self.store.len()
        );
        Ok(true)
    }

    /// Resets the timed feedback flags once the screen's banner expires.
    pub fn clear_feedback(&mut self) {
        self.is_saved = false;
        self.is_deleted = false;
    }

    /// Calendar markers derived from the committed store.
    pub fn markers(&self) -> BTreeMap<NaiveDate, DayMarker> {
        markers_for(&self.store, self.selected, &self.catalog)
    }

    /// Encouragement line for the current draft mood, when one is chosen.
    pub fn encouragement(&self) -> Option<&'static str> {
        self.draft_mood
            .and_then(|mood| self.catalog.encouragement(mood))
    }

    /// Accent color for the screen, following the draft mood.
    pub fn highlight_color(&self) -> &'static str {
        self.catalog.highlight_color(self.draft_mood)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    pub fn entry_exists(&self) -> bool {
        self.store.contains_key(&self.selected)
    }

    pub fn draft_mood(&self) -> Option<MoodId> {
        self.draft_mood
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn store(&self) -> &DiaryStore {
        &self.store
    }

    pub fn is_saved(&self) -> bool {
        self.is_saved
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn was_editing(&self) -> bool {
        self.was_editing
    }

    pub fn is_input_focused(&self) -> bool {
        self.is_input_focused
    }

    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    pub fn validation_error(&self) -> Option<&DiaryValidationError> {
        self.validation_error.as_ref()
    }
}
