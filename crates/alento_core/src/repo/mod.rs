//! # Responsibility
//! Persistence for the app's key-value stores: a raw blob access trait
//! plus one typed repository per store.
//!
//! # Invariants
//! - Typed repositories never expose partially decoded state; a payload
//!   either decodes fully or the store falls back to its empty value.
//! - `persist` writes the durable blob before any caller commits the
//!   matching in-memory state.
//!
//! # See also
//! - `crate::db` for connection bootstrap and migrations.
//! - `crate::service` for the collaborators that drive these traits.

pub mod diary_repo;
pub mod favorites_repo;
pub mod kv;
pub mod profile_repo;

use std::error::Error;
use std::fmt;

use crate::repo::kv::KvError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while reading or writing a typed store.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying blob read or write failed.
    Kv(KvError),
    /// The in-memory value could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Kv(err) => write!(f, "{err}"),
            StoreError::Encode(err) => write!(f, "store payload encoding failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Kv(err) => Some(err),
            StoreError::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(err: KvError) -> Self {
        StoreError::Kv(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err)
    }
}
