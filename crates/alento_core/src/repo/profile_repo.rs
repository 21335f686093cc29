//! Profile persistence: the single `UserProfile` record as one JSON blob.
//!
//! Log lines stay metadata-only; the stored name never reaches the log.

use log::{info, warn};

use crate::model::profile::UserProfile;
use crate::repo::kv::BlobStore;
use crate::repo::StoreResult;

/// Store name for the profile blob.
pub const PROFILE_STORE: &str = "userProfile";

pub trait ProfileRepository {
    /// Loads the profile, recovering to the default profile when the
    /// blob is missing, unreadable, or corrupt.
    fn load(&self) -> UserProfile;

    /// Serializes and durably writes the profile.
    fn persist(&self, profile: &UserProfile) -> StoreResult<()>;
}

pub struct KvProfileRepository<S: BlobStore> {
    blobs: S,
}

impl<S: BlobStore> KvProfileRepository<S> {
    pub fn new(blobs: S) -> Self {
        Self { blobs }
    }
}

impl<S: BlobStore> ProfileRepository for KvProfileRepository<S> {
    fn load(&self) -> UserProfile {
        let payload = match self.blobs.read_blob(PROFILE_STORE) {
            Ok(Some(payload)) => payload,
            Ok(None) => return UserProfile::default(),
            Err(err) => {
                warn!(
                    "event=profile_load module=repo status=recovered reason=read_failed error={err}"
                );
                return UserProfile::default();
            }
        };
        match serde_json::from_str(&payload) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(
                    "event=profile_load module=repo status=recovered reason=corrupt_payload error={err}"
                );
                UserProfile::default()
            }
        }
    }

    fn persist(&self, profile: &UserProfile) -> StoreResult<()> {
        let payload = serde_json::to_string(profile)?;
        self.blobs.write_blob(PROFILE_STORE, &payload)?;
        info!(
            "event=profile_persist module=repo status=ok has_avatar={}",
            profile.avatar_uri.is_some()
        );
        Ok(())
    }
}
