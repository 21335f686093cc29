use std::cell::{Cell, RefCell};
use std::rc::Rc;

use alento_core::db::{open_db_in_memory, DbError};
use alento_core::model::diary;
use alento_core::{
    BlobStore, DiaryEditor, DiaryEditorError, DiaryEntry, DiaryRepository, KvDiaryRepository,
    KvError, KvResult, MoodCatalog, MoodId, SaveKind, SqliteBlobStore,
};
use chrono::NaiveDate;

#[test]
fn save_reports_created_then_edited() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-10"), None);

    editor.set_mood(MoodId::Feliz);
    editor.set_text("primeiro");
    let kind = editor.save(&repo).unwrap();
    assert_eq!(kind, SaveKind::Created);
    assert_eq!(kind.feedback(), "Sentimento registrado!");
    assert!(editor.is_saved());
    assert!(!editor.was_editing());
    assert!(editor.entry_exists());

    editor.set_text("segundo");
    let kind = editor.save(&repo).unwrap();
    assert_eq!(kind, SaveKind::Edited);
    assert_eq!(kind.feedback(), "Anotação editada com sucesso!");
    assert!(editor.was_editing());
    assert_eq!(repo.load()[&date("2024-05-10")].text, "segundo");
}

#[test]
fn save_without_mood_sets_inline_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-11"), None);

    editor.set_text("sem humor");
    let err = editor.save(&repo).unwrap_err();
    assert!(matches!(err, DiaryEditorError::Validation(_)));
    assert_eq!(err.to_string(), "Por favor, selecione um humor.");
    assert_eq!(
        editor.validation_error().map(|err| err.to_string()),
        Some("Por favor, selecione um humor.".to_string())
    );
    assert!(repo.load().is_empty());

    // Picking a mood clears the inline message.
    editor.set_mood(MoodId::Calmo);
    assert!(editor.validation_error().is_none());
}

#[test]
fn date_switch_resets_transient_flags_and_rebuilds_drafts() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-12"), None);

    editor.set_mood(MoodId::Feliz);
    editor.set_text("guardado");
    editor.save(&repo).unwrap();
    editor.set_input_focused(true);
    editor.request_delete();

    editor.select_date(date("2024-05-13"));
    assert!(!editor.is_saved());
    assert!(!editor.is_deleted());
    assert!(!editor.is_input_focused());
    assert!(!editor.delete_pending());
    assert_eq!(editor.draft_mood(), None);
    assert_eq!(editor.draft_text(), "");
    assert!(!editor.entry_exists());

    editor.select_date(date("2024-05-12"));
    assert_eq!(editor.draft_mood(), Some(MoodId::Feliz));
    assert_eq!(editor.draft_text(), "guardado");
    assert!(editor.entry_exists());
}

#[test]
fn two_step_delete_requires_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-14"), None);

    editor.set_mood(MoodId::Raiva);
    editor.set_text("para deletar");
    editor.save(&repo).unwrap();

    editor.request_delete();
    assert!(editor.delete_pending());
    editor.cancel_delete();
    assert!(!editor.delete_pending());
    assert!(editor.entry_exists());
    assert_eq!(repo.load().len(), 1);

    editor.request_delete();
    let removed = editor.confirm_delete(&repo).unwrap();
    assert!(removed);
    assert!(!editor.delete_pending());
    assert!(editor.is_deleted());
    assert!(!editor.is_saved());
    assert!(!editor.entry_exists());
    assert_eq!(editor.draft_mood(), None);
    assert_eq!(editor.draft_text(), "");
    assert!(repo.load().is_empty());
}

#[test]
fn confirm_delete_without_entry_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-15"), None);

    editor.request_delete();
    let removed = editor.confirm_delete(&repo).unwrap();
    assert!(!removed);
    assert!(!editor.is_deleted());
}

#[test]
fn initial_mood_applies_only_when_day_has_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));

    let editor = DiaryEditor::open(
        &repo,
        MoodCatalog::builtin(),
        date("2024-08-01"),
        Some(MoodId::Relaxado),
    );
    assert_eq!(editor.draft_mood(), Some(MoodId::Relaxado));

    let store = diary::upsert(
        &repo.load(),
        date("2024-08-02"),
        DiaryEntry {
            mood: Some(MoodId::Feliz),
            text: "ja existia".to_string(),
        },
    )
    .unwrap();
    repo.persist(&store).unwrap();

    let editor = DiaryEditor::open(
        &repo,
        MoodCatalog::builtin(),
        date("2024-08-02"),
        Some(MoodId::Triste),
    );
    assert_eq!(editor.draft_mood(), Some(MoodId::Feliz));
}

#[test]
fn encouragement_and_highlight_follow_draft_mood() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-05-16"), None);

    assert_eq!(editor.encouragement(), None);
    assert_eq!(editor.highlight_color(), "#1755b2");

    editor.set_mood(MoodId::Feliz);
    assert_eq!(
        editor.encouragement(),
        Some("Que bom te ver feliz! Guarde essa sensação.")
    );
    assert_eq!(editor.highlight_color(), "#E91E63");
}

#[test]
fn failed_write_leaves_editor_and_durable_store_unchanged() {
    let blobs = FlakyStore::new();
    let repo = KvDiaryRepository::new(blobs.clone());
    let mut editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date("2024-07-01"), None);

    editor.set_mood(MoodId::Raiva);
    editor.set_text("antes");
    editor.save(&repo).unwrap();
    editor.clear_feedback();

    editor.set_text("depois");
    blobs.fail_writes(true);
    let err = editor.save(&repo).unwrap_err();
    assert!(matches!(err, DiaryEditorError::Persist(_)));
    assert!(!editor.is_saved());
    assert_eq!(editor.store()[&date("2024-07-01")].text, "antes");
    assert_eq!(editor.draft_text(), "depois");

    editor.request_delete();
    let err = editor.confirm_delete(&repo).unwrap_err();
    assert!(matches!(err, DiaryEditorError::Persist(_)));
    assert!(!editor.is_deleted());
    assert!(editor.entry_exists());

    blobs.fail_writes(false);
    assert_eq!(repo.load()[&date("2024-07-01")].text, "antes");
}

/// In-memory blob store whose writes can be made to fail on demand.
#[derive(Clone)]
struct FlakyStore(Rc<FlakyState>);

struct FlakyState {
    payload: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
}

impl FlakyStore {
    fn new() -> Self {
        Self(Rc::new(FlakyState {
            payload: RefCell::new(None),
            fail_writes: Cell::new(false),
        }))
    }

    fn fail_writes(&self, fail: bool) {
        self.0.fail_writes.set(fail);
    }
}

impl BlobStore for FlakyStore {
    fn read_blob(&self, _store: &str) -> KvResult<Option<String>> {
        Ok(self.0.payload.borrow().clone())
    }

    fn write_blob(&self, _store: &str, payload: &str) -> KvResult<()> {
        if self.0.fail_writes.get() {
            return Err(KvError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)));
        }
        *self.0.payload.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}
