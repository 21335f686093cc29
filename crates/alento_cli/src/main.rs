//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `alento_core` linkage.
//! - Run one diary round trip against a throwaway database file.

use std::error::Error;

use alento_core::db::open_db;
use alento_core::model::diary;
use alento_core::{DiaryEntry, DiaryRepository, KvDiaryRepository, MoodId, SqliteBlobStore};
use chrono::NaiveDate;

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from Flutter/FFI runtime setup.
    println!("alento_core ping={}", alento_core::ping());
    println!("alento_core version={}", alento_core::core_version());

    if let Err(err) = smoke_diary_round_trip() {
        eprintln!("diary smoke failed: {err}");
        std::process::exit(1);
    }
}

fn smoke_diary_round_trip() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::temp_dir().join(format!("alento-smoke-{}.sqlite3", std::process::id()));
    let conn = open_db(&db_path)?;
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("invalid smoke date")?;
    let entry = DiaryEntry {
        mood: Some(MoodId::Feliz),
        text: "smoke entry".to_string(),
    };
    let store = diary::upsert(&repo.load(), date, entry)?;
    repo.persist(&store)?;

    let reloaded = repo.load();
    println!("alento_core diary smoke entries={}", reloaded.len());

    drop(conn);
    std::fs::remove_file(&db_path)?;
    Ok(())
}
