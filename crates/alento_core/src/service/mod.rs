//! # Responsibility
//! Screen-facing collaborators that combine the models with their
//! repositories: diary editing, favorites, and the profile.
//!
//! # Invariants
//! - Services commit in-memory state only after the matching durable
//!   write succeeded.
//!
//! # See also
//! - `crate::repo` for the persistence traits these services drive.

pub mod diary_editor;
pub mod favorites_service;
pub mod profile_service;

pub use diary_editor::{DiaryEditor, DiaryEditorError, SaveKind};
pub use favorites_service::FavoritesService;
pub use profile_service::ProfileService;
