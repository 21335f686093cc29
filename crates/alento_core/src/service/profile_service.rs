//! Profile read and save.

use crate::model::profile::UserProfile;
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::StoreResult;

pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored profile, or the default when none was saved yet.
    pub fn get(&self) -> UserProfile {
        self.repo.load()
    }

    /// Durably writes the profile.
    pub fn save(&self, profile: &UserProfile) -> StoreResult<()> {
        self.repo.persist(profile)
    }
}
