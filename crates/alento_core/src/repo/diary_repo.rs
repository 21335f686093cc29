//! Diary store persistence: the whole date-keyed map as one JSON blob.

use log::{info, warn};

use crate::model::diary::DiaryStore;
use crate::repo::kv::BlobStore;
use crate::repo::StoreResult;

/// Store name for the diary blob.
pub const DIARY_STORE: &str = "diaryEntries";

pub trait DiaryRepository {
    /// Loads the diary store, recovering to an empty map when the blob
    /// is missing, unreadable, or corrupt.
    fn load(&self) -> DiaryStore;

    /// Serializes and durably writes the whole store.
    fn persist(&self, store: &DiaryStore) -> StoreResult<()>;
}

pub struct KvDiaryRepository<S: BlobStore> {
    blobs: S,
}

impl<S: BlobStore> KvDiaryRepository<S> {
    pub fn new(blobs: S) -> Self {
        Self { blobs }
    }
}

impl<S: BlobStore> DiaryRepository for KvDiaryRepository<S> {
    fn load(&self) -> DiaryStore {
        let payload = match self.blobs.read_blob(DIARY_STORE) {
            Ok(Some(payload)) => payload,
            Ok(None) => return DiaryStore::new(),
            Err(err) => {
                warn!(
                    "event=diary_load module=repo status=recovered reason=read_failed error={err}"
                );
                return DiaryStore::new();
            }
        };
        match serde_json::from_str(&payload) {
            Ok(store) => store,
            Err(err) => {
                warn!(
                    "event=diary_load module=repo status=recovered reason=corrupt_payload error={err}"
                );
                DiaryStore::new()
            }
        }
    }

    fn persist(&self, store: &DiaryStore) -> StoreResult<()> {
        let payload = serde_json::to_string(store)?;
        self.blobs.write_blob(DIARY_STORE, &payload)?;
        info!(
            "event=diary_persist module=repo status=ok entries={}",
            store.len()
        );
        Ok(())
    }
}
