//! Core domain logic for Alento.
//! This crate is the single source of truth for business invariants.

pub mod breathing;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use breathing::session::{BreathPhase, BreathingSession, DurationChoice, SessionState};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{Article, ArticleCatalog};
pub use model::diary::{DayMarker, DiaryEntry, DiaryStore, DiaryValidationError};
pub use model::mood::{MoodCatalog, MoodId, MoodSpec};
pub use model::profile::UserProfile;
pub use repo::diary_repo::{DiaryRepository, KvDiaryRepository};
pub use repo::favorites_repo::{FavoritesRepository, KvFavoritesRepository};
pub use repo::kv::{BlobStore, KvError, KvResult, SqliteBlobStore};
pub use repo::profile_repo::{KvProfileRepository, ProfileRepository};
pub use repo::{StoreError, StoreResult};
pub use service::{DiaryEditor, DiaryEditorError, FavoritesService, ProfileService, SaveKind};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
