//! Favorites persistence: the ordered article id list as one JSON blob.

use log::{info, warn};

use crate::repo::kv::BlobStore;
use crate::repo::StoreResult;

/// Store name for the favorites blob.
pub const FAVORITES_STORE: &str = "favorites";

pub trait FavoritesRepository {
    /// Loads the favorite article ids, recovering to an empty list when
    /// the blob is missing, unreadable, or corrupt.
    fn load(&self) -> Vec<String>;

    /// Serializes and durably writes the whole id list.
    fn persist(&self, ids: &[String]) -> StoreResult<()>;
}

pub struct KvFavoritesRepository<S: BlobStore> {
    blobs: S,
}

impl<S: BlobStore> KvFavoritesRepository<S> {
    pub fn new(blobs: S) -> Self {
        Self { blobs }
    }
}

impl<S: BlobStore> FavoritesRepository for KvFavoritesRepository<S> {
    fn load(&self) -> Vec<String> {
        let payload = match self.blobs.read_blob(FAVORITES_STORE) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=favorites_load module=repo status=recovered reason=read_failed error={err}"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&payload) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(
                    "event=favorites_load module=repo status=recovered reason=corrupt_payload error={err}"
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, ids: &[String]) -> StoreResult<()> {
        let payload = serde_json::to_string(ids)?;
        self.blobs.write_blob(FAVORITES_STORE, &payload)?;
        info!(
            "event=favorites_persist module=repo status=ok favorites={}",
            ids.len()
        );
        Ok(())
    }
}
