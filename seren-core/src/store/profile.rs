//! User profile store
//!
//! Same read-once/rewrite-after-change contract as the entry store, for the
//! single local [`UserProfile`] blob.

use std::sync::Arc;

use crate::types::UserProfile;

use super::BlobStore;

/// Blob key for the serialized profile.
pub const PROFILE_KEY: &str = "profile";

/// Store owning the local user profile.
pub struct ProfileStore {
    profile: UserProfile,
    blobs: Arc<BlobStore>,
}

impl ProfileStore {
    /// Load the profile, falling back to defaults on a missing or corrupt blob.
    pub fn load(blobs: Arc<BlobStore>) -> Self {
        let profile = match blobs.get(PROFILE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<UserProfile>(&json) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt profile blob, using defaults");
                    UserProfile::default()
                }
            },
            Ok(None) => UserProfile::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read profile blob, using defaults");
                UserProfile::default()
            }
        };

        Self { profile, blobs }
    }

    pub fn get(&self) -> &UserProfile {
        &self.profile
    }

    /// Replace the profile and rewrite the blob.
    pub fn set(&mut self, profile: UserProfile) {
        self.profile = profile;
        self.persist();
    }

    /// Reset to defaults and drop the blob (explicit user action).
    pub fn reset(&mut self) {
        self.profile = UserProfile::default();
        if let Err(e) = self.blobs.remove(PROFILE_KEY) {
            tracing::warn!(error = %e, "Failed to clear profile blob");
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.profile) {
            Ok(json) => {
                if let Err(e) = self.blobs.set(PROFILE_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to persist profile");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode profile"),
        }
    }
}
