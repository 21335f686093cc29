use alento_core::db::open_db_in_memory;
use alento_core::model::diary;
use alento_core::model::mood::DEFAULT_HIGHLIGHT_COLOR;
use alento_core::{
    BlobStore, DiaryEntry, DiaryRepository, DiaryStore, KvDiaryRepository, MoodCatalog, MoodId,
    SqliteBlobStore,
};
use chrono::NaiveDate;

#[test]
fn persist_then_load_round_trips_whole_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));

    let store = diary::upsert(
        &repo.load(),
        date("2024-03-01"),
        entry(Some(MoodId::Feliz), "Bom dia"),
    )
    .unwrap();
    let store = diary::upsert(&store, date("2024-03-02"), entry(Some(MoodId::Triste), "")).unwrap();
    repo.persist(&store).unwrap();

    assert_eq!(repo.load(), store);
}

#[test]
fn persist_overwrites_the_whole_blob() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));

    let first = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-01"),
        entry(Some(MoodId::Feliz), "primeiro"),
    )
    .unwrap();
    repo.persist(&first).unwrap();

    let second = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-05"),
        entry(Some(MoodId::Calmo), "segundo"),
    )
    .unwrap();
    repo.persist(&second).unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key(&date("2024-03-05")));
}

#[test]
fn load_returns_empty_store_when_blob_missing() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));

    assert!(repo.load().is_empty());
}

#[test]
fn load_recovers_to_empty_on_corrupt_payload() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    blobs.write_blob("diaryEntries", "{not valid json").unwrap();

    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    assert!(repo.load().is_empty());
}

#[test]
fn load_tolerates_entries_with_null_mood() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    blobs
        .write_blob(
            "diaryEntries",
            r#"{"2024-01-10":{"mood":null,"text":"legado"}}"#,
        )
        .unwrap();

    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let loaded = repo.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[&date("2024-01-10")].mood, None);
    assert_eq!(loaded[&date("2024-01-10")].text, "legado");
}

#[test]
fn upsert_rejects_entry_without_mood() {
    let store = DiaryStore::new();
    let err = diary::upsert(&store, date("2024-03-01"), entry(None, "texto")).unwrap_err();

    assert_eq!(err.to_string(), "Por favor, selecione um humor.");
    assert!(store.is_empty());
}

#[test]
fn upsert_replaces_entry_for_same_date() {
    let store = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-01"),
        entry(Some(MoodId::Feliz), "antes"),
    )
    .unwrap();
    let store = diary::upsert(
        &store,
        date("2024-03-01"),
        entry(Some(MoodId::Raiva), "depois"),
    )
    .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store[&date("2024-03-01")].mood, Some(MoodId::Raiva));
    assert_eq!(store[&date("2024-03-01")].text, "depois");

    let again = diary::upsert(
        &store,
        date("2024-03-01"),
        entry(Some(MoodId::Raiva), "depois"),
    )
    .unwrap();
    assert_eq!(again, store);
}

#[test]
fn remove_is_noop_for_absent_date() {
    let store = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-01"),
        entry(Some(MoodId::Relaxado), "presente"),
    )
    .unwrap();

    let removed = diary::remove(&store, date("2024-03-02"));
    assert_eq!(removed, store);

    let removed = diary::remove(&store, date("2024-03-01"));
    assert!(removed.is_empty());
}

#[test]
fn markers_decorate_mood_days_and_selected_day() {
    let catalog = MoodCatalog::builtin();
    let store = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-01"),
        entry(Some(MoodId::Feliz), "feliz"),
    )
    .unwrap();
    let store = diary::upsert(
        &store,
        date("2024-03-02"),
        entry(Some(MoodId::Calmo), "calmo"),
    )
    .unwrap();

    let markers = diary::markers_for(&store, date("2024-03-01"), &catalog);
    assert_eq!(markers.len(), 2);

    let selected = &markers[&date("2024-03-01")];
    assert!(selected.has_dot);
    assert_eq!(selected.dot_color, Some("#E91E63"));
    assert!(selected.is_selected);
    assert_eq!(selected.selected_color, Some("#E91E63"));

    let other = &markers[&date("2024-03-02")];
    assert!(other.has_dot);
    assert_eq!(other.dot_color, Some("#9C27B0"));
    assert!(!other.is_selected);
    assert_eq!(other.selected_color, None);
}

#[test]
fn selected_day_without_entry_gets_default_highlight() {
    let catalog = MoodCatalog::builtin();
    let store = diary::upsert(
        &DiaryStore::new(),
        date("2024-03-01"),
        entry(Some(MoodId::Triste), "triste"),
    )
    .unwrap();

    let markers = diary::markers_for(&store, date("2024-03-09"), &catalog);
    let selected = &markers[&date("2024-03-09")];
    assert!(!selected.has_dot);
    assert_eq!(selected.dot_color, None);
    assert!(selected.is_selected);
    assert_eq!(selected.selected_color, Some(DEFAULT_HIGHLIGHT_COLOR));
}

#[test]
fn entries_without_resolvable_mood_get_no_dot() {
    let catalog = MoodCatalog::builtin();
    let mut store = DiaryStore::new();
    store.insert(date("2024-03-01"), entry(None, "legado"));

    let markers = diary::markers_for(&store, date("2024-03-05"), &catalog);
    assert!(!markers.contains_key(&date("2024-03-01")));
    assert!(markers[&date("2024-03-05")].is_selected);
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

fn entry(mood: Option<MoodId>, text: &str) -> DiaryEntry {
    DiaryEntry {
        mood,
        text: text.to_string(),
    }
}
